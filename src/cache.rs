use crate::api::{
    ApiError, Calendar, CalendarTab, Event, HeadToHead, MatchRecord, Player, PrizeBreakdown,
    RankingTable, RankingType, RoundFormat, RoundPrizes,
};
use crate::data_provider::SnookerDataProvider;
use crate::match_list::{distinct_rounds, RoundInfo};
use cached::proc_macro::cached;
use tracing::debug;

pub use cached::Cached;

#[cfg(test)]
#[derive(Debug)]
pub struct CacheStats {
    pub calendar_entries: usize,
    pub event_entries: usize,
    pub event_matches_entries: usize,
    pub match_entries: usize,
    pub player_entries: usize,
    pub rankings_entries: usize,
    pub head_to_head_entries: usize,
    pub prize_money_entries: usize,
    pub round_format_entries: usize,
    pub round_prizes_entries: usize,
}

#[cfg(test)]
pub async fn cache_stats() -> CacheStats {
    CacheStats {
        calendar_entries: CALENDAR_CACHE.lock().await.cache_size(),
        event_entries: EVENT_CACHE.lock().await.cache_size(),
        event_matches_entries: EVENT_MATCHES_CACHE.lock().await.cache_size(),
        match_entries: MATCH_CACHE.lock().await.cache_size(),
        player_entries: PLAYER_CACHE.lock().await.cache_size(),
        rankings_entries: RANKINGS_CACHE.lock().await.cache_size(),
        head_to_head_entries: HEAD_TO_HEAD_CACHE.lock().await.cache_size(),
        prize_money_entries: PRIZE_MONEY_CACHE.lock().await.cache_size(),
        round_format_entries: ROUND_FORMAT_CACHE.lock().await.cache_size(),
        round_prizes_entries: ROUND_PRIZES_CACHE.lock().await.cache_size(),
    }
}

fn calendar_key(tab: CalendarTab, season: Option<i32>) -> String {
    format!("{}:{}", tab, season.map(|s| s.to_string()).unwrap_or_default())
}

fn rankings_key(ranking_type: RankingType, season: Option<i32>) -> String {
    format!(
        "{}:{}",
        ranking_type,
        season.map(|s| s.to_string()).unwrap_or_default()
    )
}

#[cached(
    name = "CALENDAR_CACHE",
    type = "cached::TimedSizedCache<String, Calendar>",
    create = "{ cached::TimedSizedCache::with_size_and_lifespan(6, 300) }",
    convert = r#"{ calendar_key(tab, season) }"#,
    result = true
)]
pub async fn fetch_calendar_cached(
    client: &dyn SnookerDataProvider,
    tab: CalendarTab,
    season: Option<i32>,
) -> Result<Calendar, ApiError> {
    client.calendar(tab, season).await
}

#[cached(
    name = "EVENT_CACHE",
    type = "cached::TimedSizedCache<i64, Event>",
    create = "{ cached::TimedSizedCache::with_size_and_lifespan(50, 3600) }",
    convert = r#"{ event_id }"#,
    result = true
)]
pub async fn fetch_event_cached(
    client: &dyn SnookerDataProvider,
    event_id: i64,
) -> Result<Event, ApiError> {
    client.event(event_id).await
}

// Match lists carry live scores
#[cached(
    name = "EVENT_MATCHES_CACHE",
    type = "cached::TimedSizedCache<i64, Vec<MatchRecord>>",
    create = "{ cached::TimedSizedCache::with_size_and_lifespan(20, 30) }",
    convert = r#"{ event_id }"#,
    result = true
)]
pub async fn fetch_event_matches_cached(
    client: &dyn SnookerDataProvider,
    event_id: i64,
) -> Result<Vec<MatchRecord>, ApiError> {
    client.event_matches(event_id).await
}

#[cached(
    name = "MATCH_CACHE",
    type = "cached::TimedSizedCache<i64, MatchRecord>",
    create = "{ cached::TimedSizedCache::with_size_and_lifespan(100, 30) }",
    convert = r#"{ api_match_id }"#,
    result = true
)]
pub async fn fetch_match_cached(
    client: &dyn SnookerDataProvider,
    api_match_id: i64,
) -> Result<MatchRecord, ApiError> {
    client.match_detail(api_match_id).await
}

#[cached(
    name = "PLAYER_CACHE",
    type = "cached::TimedSizedCache<i64, Player>",
    create = "{ cached::TimedSizedCache::with_size_and_lifespan(200, 86400) }",
    convert = r#"{ player_id }"#,
    result = true
)]
pub async fn fetch_player_cached(
    client: &dyn SnookerDataProvider,
    player_id: i64,
) -> Result<Player, ApiError> {
    client.player(player_id).await
}

#[cached(
    name = "RANKINGS_CACHE",
    type = "cached::TimedSizedCache<String, RankingTable>",
    create = "{ cached::TimedSizedCache::with_size_and_lifespan(10, 3600) }",
    convert = r#"{ rankings_key(ranking_type, season) }"#,
    result = true
)]
pub async fn fetch_rankings_cached(
    client: &dyn SnookerDataProvider,
    ranking_type: RankingType,
    season: Option<i32>,
) -> Result<RankingTable, ApiError> {
    client.rankings(ranking_type, season).await
}

#[cached(
    name = "HEAD_TO_HEAD_CACHE",
    type = "cached::TimedSizedCache<(i64, i64), HeadToHead>",
    create = "{ cached::TimedSizedCache::with_size_and_lifespan(50, 3600) }",
    convert = r#"{ (player1_id, player2_id) }"#,
    result = true
)]
pub async fn fetch_head_to_head_cached(
    client: &dyn SnookerDataProvider,
    player1_id: i64,
    player2_id: i64,
) -> Result<HeadToHead, ApiError> {
    client.head_to_head(player1_id, player2_id).await
}

#[cached(
    name = "PRIZE_MONEY_CACHE",
    type = "cached::TimedSizedCache<i64, PrizeBreakdown>",
    create = "{ cached::TimedSizedCache::with_size_and_lifespan(50, 86400) }",
    convert = r#"{ event_id }"#,
    result = true
)]
pub async fn fetch_prize_money_cached(
    client: &dyn SnookerDataProvider,
    event_id: i64,
) -> Result<PrizeBreakdown, ApiError> {
    client.prize_money(event_id).await
}

#[cached(
    name = "ROUND_FORMAT_CACHE",
    type = "cached::TimedSizedCache<(i32, i32), RoundFormat>",
    create = "{ cached::TimedSizedCache::with_size_and_lifespan(100, 86400) }",
    convert = r#"{ (round, season) }"#,
    result = true
)]
pub async fn fetch_round_format_cached(
    client: &dyn SnookerDataProvider,
    round: i32,
    season: i32,
) -> Result<RoundFormat, ApiError> {
    client.round_format(round, season).await
}

#[cached(
    name = "ROUND_PRIZES_CACHE",
    type = "cached::TimedSizedCache<i64, RoundPrizes>",
    create = "{ cached::TimedSizedCache::with_size_and_lifespan(50, 86400) }",
    convert = r#"{ event_id }"#,
    result = true
)]
pub async fn fetch_round_prizes_cached(
    client: &dyn SnookerDataProvider,
    event_id: i64,
) -> Result<RoundPrizes, ApiError> {
    client.round_prizes(event_id).await
}

/// Formats and prizes for the rounds of an event
///
/// The event supplies the season (`fallback_season` when it has none) and its
/// matches supply the rounds; both usually come straight from the cache.
/// Formats the backend attributes to another event of the season are left
/// out, as are rounds it has no format for. Missing prizes leave the map empty.
pub async fn fetch_round_info(
    client: &dyn SnookerDataProvider,
    event_id: i64,
    fallback_season: Option<i32>,
) -> Result<RoundInfo, ApiError> {
    let event = fetch_event_cached(client, event_id).await?;
    let matches = fetch_event_matches_cached(client, event_id).await?;

    let mut info = RoundInfo::default();
    if let Some(season) = event.season.or(fallback_season) {
        for round in distinct_rounds(&matches) {
            match fetch_round_format_cached(client, round, season).await {
                Ok(format) if format.applies_to(event_id) => {
                    info.formats.insert(round, format);
                }
                Ok(format) => debug!(
                    "CACHE: Round {} format of season {} belongs to event {:?}",
                    round, season, format.event_id
                ),
                Err(e) => debug!("CACHE: No format for round {} of season {}: {}", round, season, e),
            }
        }
    }
    match fetch_round_prizes_cached(client, event_id).await {
        Ok(prizes) => info.prizes = prizes,
        Err(e) => debug!("CACHE: No round prizes for event {}: {}", event_id, e),
    }
    Ok(info)
}

pub async fn refresh_calendar(
    client: &dyn SnookerDataProvider,
    tab: CalendarTab,
    season: Option<i32>,
) -> Result<Calendar, ApiError> {
    CALENDAR_CACHE
        .lock()
        .await
        .cache_remove(&calendar_key(tab, season));
    fetch_calendar_cached(client, tab, season).await
}

pub async fn refresh_event_matches(
    client: &dyn SnookerDataProvider,
    event_id: i64,
) -> Result<Vec<MatchRecord>, ApiError> {
    EVENT_MATCHES_CACHE.lock().await.cache_remove(&event_id);
    fetch_event_matches_cached(client, event_id).await
}

pub async fn refresh_match(
    client: &dyn SnookerDataProvider,
    api_match_id: i64,
) -> Result<MatchRecord, ApiError> {
    MATCH_CACHE.lock().await.cache_remove(&api_match_id);
    fetch_match_cached(client, api_match_id).await
}

pub async fn refresh_rankings(
    client: &dyn SnookerDataProvider,
    ranking_type: RankingType,
    season: Option<i32>,
) -> Result<RankingTable, ApiError> {
    RANKINGS_CACHE
        .lock()
        .await
        .cache_remove(&rankings_key(ranking_type, season));
    fetch_rankings_cached(client, ranking_type, season).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dev::MockClient;
    use crate::fixtures::{MOCK_ACTIVE_EVENT_ID, MOCK_RECENT_EVENT_ID};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts calls reaching the provider, delegating to fixtures
    #[derive(Default)]
    struct CountingClient {
        inner: MockClient,
        calls: AtomicUsize,
    }

    impl CountingClient {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn hit(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl SnookerDataProvider for CountingClient {
        async fn calendar(&self, tab: CalendarTab, season: Option<i32>) -> Result<Calendar, ApiError> {
            self.hit();
            self.inner.calendar(tab, season).await
        }
        async fn event(&self, event_id: i64) -> Result<Event, ApiError> {
            self.hit();
            self.inner.event(event_id).await
        }
        async fn event_matches(&self, event_id: i64) -> Result<Vec<MatchRecord>, ApiError> {
            self.hit();
            self.inner.event_matches(event_id).await
        }
        async fn match_detail(&self, api_match_id: i64) -> Result<MatchRecord, ApiError> {
            self.hit();
            self.inner.match_detail(api_match_id).await
        }
        async fn player(&self, player_id: i64) -> Result<Player, ApiError> {
            self.hit();
            self.inner.player(player_id).await
        }
        async fn rankings(&self, ranking_type: RankingType, season: Option<i32>) -> Result<RankingTable, ApiError> {
            self.hit();
            self.inner.rankings(ranking_type, season).await
        }
        async fn head_to_head(&self, p1: i64, p2: i64) -> Result<HeadToHead, ApiError> {
            self.hit();
            self.inner.head_to_head(p1, p2).await
        }
        async fn prize_money(&self, event_id: i64) -> Result<PrizeBreakdown, ApiError> {
            self.hit();
            self.inner.prize_money(event_id).await
        }
        async fn round_format(&self, round: i32, season: i32) -> Result<RoundFormat, ApiError> {
            self.hit();
            self.inner.round_format(round, season).await
        }
        async fn round_prizes(&self, event_id: i64) -> Result<RoundPrizes, ApiError> {
            self.hit();
            self.inner.round_prizes(event_id).await
        }
    }

    // Each test uses its own keys since the caches are process-wide

    #[tokio::test]
    async fn test_player_served_from_cache() {
        let client = CountingClient::default();
        let first = fetch_player_cached(&client, 424_242).await.unwrap();
        let second = fetch_player_cached(&client, 424_242).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_refresh_event_matches_bypasses_cache() {
        let client = CountingClient::default();
        fetch_event_matches_cached(&client, 919_191).await.unwrap();
        fetch_event_matches_cached(&client, 919_191).await.unwrap();
        assert_eq!(client.calls(), 1);

        let refreshed = refresh_event_matches(&client, 919_191).await.unwrap();
        assert_eq!(client.calls(), 2);
        assert!(refreshed.iter().all(|m| m.event_id == 919_191));
    }

    #[tokio::test]
    async fn test_calendar_keyed_by_season() {
        let client = CountingClient::default();
        fetch_calendar_cached(&client, CalendarTab::All, Some(1999)).await.unwrap();
        fetch_calendar_cached(&client, CalendarTab::All, Some(1998)).await.unwrap();
        fetch_calendar_cached(&client, CalendarTab::All, Some(1999)).await.unwrap();
        assert_eq!(client.calls(), 2);

        refresh_calendar(&client, CalendarTab::All, Some(1999)).await.unwrap();
        assert_eq!(client.calls(), 3);
    }

    #[tokio::test]
    async fn test_head_to_head_key_is_ordered_pair() {
        let client = CountingClient::default();
        fetch_head_to_head_cached(&client, 880_001, 880_002).await.unwrap();
        fetch_head_to_head_cached(&client, 880_002, 880_001).await.unwrap();
        assert_eq!(client.calls(), 2);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let failing = MockClient::failing();
        assert!(fetch_prize_money_cached(&failing, 770_077).await.is_err());

        let client = CountingClient::default();
        let prize = fetch_prize_money_cached(&client, 770_077).await.unwrap();
        assert!(prize.winner.is_some());
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_cache_stats_after_rankings_fetch() {
        let client = CountingClient::default();
        fetch_rankings_cached(&client, RankingType::QTRankings, Some(1987)).await.unwrap();
        assert!(cache_stats().await.rankings_entries >= 1);
        refresh_rankings(&client, RankingType::QTRankings, Some(1987)).await.unwrap();
        assert_eq!(client.calls(), 2);
    }

    #[tokio::test]
    async fn test_round_info_for_event() {
        let client = CountingClient::default();
        let info = fetch_round_info(&client, MOCK_ACTIVE_EVENT_ID, None).await.unwrap();
        assert_eq!(info.formats.keys().copied().collect::<Vec<_>>(), vec![11, 12, 13]);
        assert_eq!(info.details(Some(13)), Some("Best of 11, £50K".to_string()));
        assert_eq!(info.details(None), None);
        assert!(cache_stats().await.round_format_entries >= 3);
    }

    #[tokio::test]
    async fn test_round_info_skips_formats_of_another_event() {
        let client = CountingClient::default();
        let info = fetch_round_info(&client, MOCK_RECENT_EVENT_ID, None).await.unwrap();
        assert!(info.formats.is_empty());
        assert_eq!(info.details(Some(12)), Some("£25K".to_string()));
    }

    #[tokio::test]
    async fn test_round_prizes_served_from_cache() {
        let client = CountingClient::default();
        fetch_round_prizes_cached(&client, 660_066).await.unwrap();
        fetch_round_prizes_cached(&client, 660_066).await.unwrap();
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_round_info_fails_without_event() {
        let failing = MockClient::failing();
        assert!(fetch_round_info(&failing, 550_055, Some(2025)).await.is_err());
    }
}
