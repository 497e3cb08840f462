use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::debug;

use super::action::Action;
use crate::api::{CalendarTab, RankingType};
use crate::cache;
use crate::data_provider::SnookerDataProvider;

/// Side effects returned by the reducer
///
/// The fetch variants are plain data so reducers stay pure and testable; the
/// runtime turns them into futures through [`DataEffects`].
pub enum Effect {
    None,
    Action(Action),
    Batch(Vec<Effect>),
    Async(Pin<Box<dyn Future<Output = Action> + Send>>),

    FetchCalendar { tour: CalendarTab, force: bool },
    FetchEvent(i64),
    FetchEventMatches { event_id: i64, force: bool },
    FetchMatch { api_match_id: i64, force: bool },
    FetchPlayer(i64),
    FetchRankings { ranking_type: RankingType, force: bool },
    FetchHeadToHead(i64, i64),
    FetchPrizeMoney(i64),
    FetchRoundInfo(i64),
}

impl Effect {
    /// Collapse a list of effects, avoiding a batch for zero or one entries
    pub fn batch(mut effects: Vec<Effect>) -> Effect {
        effects.retain(|e| !matches!(e, Effect::None));
        match effects.len() {
            0 => Effect::None,
            1 => effects.pop().unwrap_or(Effect::None),
            _ => Effect::Batch(effects),
        }
    }

    /// Flatten nested batches into the list of leaf effects
    pub fn flatten(self) -> Vec<Effect> {
        match self {
            Effect::None => Vec::new(),
            Effect::Batch(effects) => effects.into_iter().flat_map(Effect::flatten).collect(),
            other => vec![other],
        }
    }
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::None => write!(f, "None"),
            Effect::Action(action) => f.debug_tuple("Action").field(action).finish(),
            Effect::Batch(effects) => f.debug_tuple("Batch").field(effects).finish(),
            Effect::Async(_) => write!(f, "Async(<future>)"),
            Effect::FetchCalendar { tour, force } => f
                .debug_struct("FetchCalendar")
                .field("tour", tour)
                .field("force", force)
                .finish(),
            Effect::FetchEvent(id) => f.debug_tuple("FetchEvent").field(id).finish(),
            Effect::FetchEventMatches { event_id, force } => f
                .debug_struct("FetchEventMatches")
                .field("event_id", event_id)
                .field("force", force)
                .finish(),
            Effect::FetchMatch {
                api_match_id,
                force,
            } => f
                .debug_struct("FetchMatch")
                .field("api_match_id", api_match_id)
                .field("force", force)
                .finish(),
            Effect::FetchPlayer(id) => f.debug_tuple("FetchPlayer").field(id).finish(),
            Effect::FetchRankings {
                ranking_type,
                force,
            } => f
                .debug_struct("FetchRankings")
                .field("ranking_type", ranking_type)
                .field("force", force)
                .finish(),
            Effect::FetchHeadToHead(p1, p2) => {
                f.debug_tuple("FetchHeadToHead").field(p1).field(p2).finish()
            }
            Effect::FetchPrizeMoney(id) => f.debug_tuple("FetchPrizeMoney").field(id).finish(),
            Effect::FetchRoundInfo(id) => f.debug_tuple("FetchRoundInfo").field(id).finish(),
        }
    }
}

/// Effect handler for data fetching operations
///
/// Each method returns an Effect that will dispatch the appropriate
/// *Loaded action when complete. Forced fetches evict the cache entry first.
pub struct DataEffects {
    client: Arc<dyn SnookerDataProvider>,
    season: Option<i32>,
}

impl DataEffects {
    pub fn new(client: Arc<dyn SnookerDataProvider>, season: Option<i32>) -> Self {
        Self { client, season }
    }

    /// Turn a typed fetch request into an async effect
    ///
    /// Non-fetch effects are returned unchanged.
    pub fn resolve(&self, effect: Effect) -> Effect {
        match effect {
            Effect::FetchCalendar { tour, force } => self.fetch_calendar(tour, force),
            Effect::FetchEvent(event_id) => self.fetch_event(event_id),
            Effect::FetchEventMatches { event_id, force } => {
                self.fetch_event_matches(event_id, force)
            }
            Effect::FetchMatch {
                api_match_id,
                force,
            } => self.fetch_match(api_match_id, force),
            Effect::FetchPlayer(player_id) => self.fetch_player(player_id),
            Effect::FetchRankings {
                ranking_type,
                force,
            } => self.fetch_rankings(ranking_type, force),
            Effect::FetchHeadToHead(p1, p2) => self.fetch_head_to_head(p1, p2),
            Effect::FetchPrizeMoney(event_id) => self.fetch_prize_money(event_id),
            Effect::FetchRoundInfo(event_id) => self.fetch_round_info(event_id),
            other => other,
        }
    }

    pub fn fetch_calendar(&self, tour: CalendarTab, force: bool) -> Effect {
        debug!("EFFECT: fetch calendar tour={} force={}", tour, force);
        let client = self.client.clone();
        let season = self.season;
        Effect::Async(Box::pin(async move {
            let result = if force {
                cache::refresh_calendar(client.as_ref(), tour, season).await
            } else {
                cache::fetch_calendar_cached(client.as_ref(), tour, season).await
            };
            Action::CalendarLoaded(tour, result.map_err(|e| e.to_string()))
        }))
    }

    pub fn fetch_event(&self, event_id: i64) -> Effect {
        let client = self.client.clone();
        Effect::Async(Box::pin(async move {
            let result = cache::fetch_event_cached(client.as_ref(), event_id).await;
            Action::EventLoaded(event_id, result.map_err(|e| e.to_string()))
        }))
    }

    /// Fetch all matches of an event (live data, short cache lifespan)
    pub fn fetch_event_matches(&self, event_id: i64, force: bool) -> Effect {
        debug!("EFFECT: fetch matches event_id={} force={}", event_id, force);
        let client = self.client.clone();
        Effect::Async(Box::pin(async move {
            let result = if force {
                cache::refresh_event_matches(client.as_ref(), event_id).await
            } else {
                cache::fetch_event_matches_cached(client.as_ref(), event_id).await
            };
            Action::EventMatchesLoaded(event_id, result.map_err(|e| e.to_string()))
        }))
    }

    pub fn fetch_match(&self, api_match_id: i64, force: bool) -> Effect {
        let client = self.client.clone();
        Effect::Async(Box::pin(async move {
            let result = if force {
                cache::refresh_match(client.as_ref(), api_match_id).await
            } else {
                cache::fetch_match_cached(client.as_ref(), api_match_id).await
            };
            Action::MatchLoaded(api_match_id, result.map_err(|e| e.to_string()))
        }))
    }

    pub fn fetch_player(&self, player_id: i64) -> Effect {
        let client = self.client.clone();
        Effect::Async(Box::pin(async move {
            let result = cache::fetch_player_cached(client.as_ref(), player_id).await;
            Action::PlayerLoaded(player_id, result.map_err(|e| e.to_string()))
        }))
    }

    pub fn fetch_rankings(&self, ranking_type: RankingType, force: bool) -> Effect {
        debug!("EFFECT: fetch rankings type={} force={}", ranking_type, force);
        let client = self.client.clone();
        let season = self.season;
        Effect::Async(Box::pin(async move {
            let result = if force {
                cache::refresh_rankings(client.as_ref(), ranking_type, season).await
            } else {
                cache::fetch_rankings_cached(client.as_ref(), ranking_type, season).await
            };
            Action::RankingsLoaded(ranking_type, result.map_err(|e| e.to_string()))
        }))
    }

    pub fn fetch_head_to_head(&self, player1_id: i64, player2_id: i64) -> Effect {
        let client = self.client.clone();
        Effect::Async(Box::pin(async move {
            let result =
                cache::fetch_head_to_head_cached(client.as_ref(), player1_id, player2_id).await;
            Action::HeadToHeadLoaded((player1_id, player2_id), result.map_err(|e| e.to_string()))
        }))
    }

    pub fn fetch_prize_money(&self, event_id: i64) -> Effect {
        let client = self.client.clone();
        Effect::Async(Box::pin(async move {
            let result = cache::fetch_prize_money_cached(client.as_ref(), event_id).await;
            Action::PrizeMoneyLoaded(event_id, result.map_err(|e| e.to_string()))
        }))
    }

    /// Round formats and prizes, once the event and its matches are cached
    pub fn fetch_round_info(&self, event_id: i64) -> Effect {
        let client = self.client.clone();
        let season = self.season;
        Effect::Async(Box::pin(async move {
            let result = cache::fetch_round_info(client.as_ref(), event_id, season).await;
            Action::RoundInfoLoaded(event_id, result.map_err(|e| e.to_string()))
        }))
    }
}
