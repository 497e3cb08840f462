/// Mock snooker API client for development and testing
use async_trait::async_trait;
use tracing::info;

use crate::api::{
    ApiError, Calendar, CalendarTab, Event, HeadToHead, MatchRecord, Player, PrizeBreakdown,
    RankingTable, RankingType, RoundFormat, RoundPrizes,
};
use crate::data_provider::SnookerDataProvider;
use crate::fixtures;

/// Mock client that returns fixture data instead of making real API calls
#[derive(Debug, Default)]
pub struct MockClient {
    failing: bool,
}

impl MockClient {
    /// Create a new mock client
    pub fn new() -> Self {
        info!("Creating MockClient for development mode");
        Self { failing: false }
    }

    /// A client whose every call fails with a server error
    pub fn failing() -> Self {
        Self { failing: true }
    }

    fn check(&self) -> Result<(), ApiError> {
        if self.failing {
            Err(ApiError::ServerError {
                status: 503,
                message: "Service unavailable".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SnookerDataProvider for MockClient {
    async fn calendar(&self, tab: CalendarTab, season: Option<i32>) -> Result<Calendar, ApiError> {
        info!("MockClient: Returning mock calendar for tab {}", tab);
        self.check()?;
        Ok(fixtures::create_mock_calendar(tab, season))
    }

    async fn event(&self, event_id: i64) -> Result<Event, ApiError> {
        info!("MockClient: Returning mock event {}", event_id);
        self.check()?;
        Ok(fixtures::create_mock_event(event_id))
    }

    async fn event_matches(&self, event_id: i64) -> Result<Vec<MatchRecord>, ApiError> {
        info!("MockClient: Returning mock matches for event {}", event_id);
        self.check()?;
        Ok(fixtures::create_mock_event_matches(event_id))
    }

    async fn match_detail(&self, api_match_id: i64) -> Result<MatchRecord, ApiError> {
        info!("MockClient: Returning mock match {}", api_match_id);
        self.check()?;
        fixtures::create_mock_event_matches(fixtures::MOCK_ACTIVE_EVENT_ID)
            .into_iter()
            .find(|m| m.api_match_id == Some(api_match_id))
            .ok_or_else(|| ApiError::NotFound {
                message: format!("Match {} not found", api_match_id),
            })
    }

    async fn player(&self, player_id: i64) -> Result<Player, ApiError> {
        info!("MockClient: Returning mock player {}", player_id);
        self.check()?;
        Ok(fixtures::create_mock_player(player_id))
    }

    async fn rankings(
        &self,
        ranking_type: RankingType,
        season: Option<i32>,
    ) -> Result<RankingTable, ApiError> {
        info!("MockClient: Returning mock {} rankings", ranking_type);
        self.check()?;
        Ok(fixtures::create_mock_rankings(ranking_type, season))
    }

    async fn head_to_head(
        &self,
        player1_id: i64,
        player2_id: i64,
    ) -> Result<HeadToHead, ApiError> {
        info!("MockClient: Returning mock h2h {} v {}", player1_id, player2_id);
        self.check()?;
        Ok(fixtures::create_mock_head_to_head(player1_id, player2_id))
    }

    async fn prize_money(&self, event_id: i64) -> Result<PrizeBreakdown, ApiError> {
        info!("MockClient: Returning mock prize money for event {}", event_id);
        self.check()?;
        Ok(fixtures::create_mock_prize_money(event_id))
    }

    async fn round_format(&self, round: i32, season: i32) -> Result<RoundFormat, ApiError> {
        info!("MockClient: Returning mock format for round {} of {}", round, season);
        self.check()?;
        fixtures::create_mock_round_format(round, season).ok_or_else(|| ApiError::NotFound {
            message: format!("No format for round {} in season {}", round, season),
        })
    }

    async fn round_prizes(&self, event_id: i64) -> Result<RoundPrizes, ApiError> {
        info!("MockClient: Returning mock round prizes for event {}", event_id);
        self.check()?;
        Ok(fixtures::create_mock_round_prizes(event_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_match_detail_by_api_id() {
        let client = MockClient::new();
        let m = client.match_detail(8_840_003).await.unwrap();
        assert_eq!(m.id, 3);

        let err = client.match_detail(1).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_failing_client_returns_server_error() {
        let client = MockClient::failing();
        let err = client.player(5).await.unwrap_err();
        assert!(err.is_transient());
        assert_eq!(err.to_string(), "Server error 503: Service unavailable");
    }

    #[tokio::test]
    async fn test_round_format_outside_season_not_found() {
        let client = MockClient::new();
        let format = client.round_format(15, fixtures::MOCK_SEASON).await.unwrap();
        assert_eq!(format.format_text(), Some("Best of 19".to_string()));

        let err = client.round_format(15, 1999).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }));
    }
}
