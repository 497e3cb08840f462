/// Trait for providing snooker data, abstracting over the real API client and mock implementations
use async_trait::async_trait;

use crate::api::{
    ApiError, Calendar, CalendarTab, Client, Event, HeadToHead, MatchRecord, Player,
    PrizeBreakdown, RankingTable, RankingType, RoundFormat, RoundPrizes,
};

/// Trait for snooker data providers, implemented by both the real Client and MockClient
#[async_trait]
pub trait SnookerDataProvider: Send + Sync {
    /// Tournaments for a tour tab, grouped into active, upcoming and recent
    async fn calendar(&self, tab: CalendarTab, season: Option<i32>) -> Result<Calendar, ApiError>;

    /// Event details
    async fn event(&self, event_id: i64) -> Result<Event, ApiError>;

    /// All matches of an event
    async fn event_matches(&self, event_id: i64) -> Result<Vec<MatchRecord>, ApiError>;

    /// A single match by its API match id
    async fn match_detail(&self, api_match_id: i64) -> Result<MatchRecord, ApiError>;

    async fn player(&self, player_id: i64) -> Result<Player, ApiError>;

    async fn rankings(
        &self,
        ranking_type: RankingType,
        season: Option<i32>,
    ) -> Result<RankingTable, ApiError>;

    async fn head_to_head(&self, player1_id: i64, player2_id: i64)
        -> Result<HeadToHead, ApiError>;

    /// Winner and runner-up prize money for an event
    async fn prize_money(&self, event_id: i64) -> Result<PrizeBreakdown, ApiError>;

    /// Best-of format and prize of a round in a season
    async fn round_format(&self, round: i32, season: i32) -> Result<RoundFormat, ApiError>;

    /// Formatted prize money per round of an event
    async fn round_prizes(&self, event_id: i64) -> Result<RoundPrizes, ApiError>;
}

#[async_trait]
impl SnookerDataProvider for Client {
    async fn calendar(&self, tab: CalendarTab, season: Option<i32>) -> Result<Calendar, ApiError> {
        Client::calendar(self, tab, season).await
    }

    async fn event(&self, event_id: i64) -> Result<Event, ApiError> {
        Client::event(self, event_id).await
    }

    async fn event_matches(&self, event_id: i64) -> Result<Vec<MatchRecord>, ApiError> {
        Client::event_matches(self, event_id).await
    }

    async fn match_detail(&self, api_match_id: i64) -> Result<MatchRecord, ApiError> {
        Client::match_detail(self, api_match_id).await
    }

    async fn player(&self, player_id: i64) -> Result<Player, ApiError> {
        Client::player(self, player_id).await
    }

    async fn rankings(
        &self,
        ranking_type: RankingType,
        season: Option<i32>,
    ) -> Result<RankingTable, ApiError> {
        Client::rankings(self, ranking_type, season).await
    }

    async fn head_to_head(
        &self,
        player1_id: i64,
        player2_id: i64,
    ) -> Result<HeadToHead, ApiError> {
        Client::head_to_head(self, player1_id, player2_id).await
    }

    async fn prize_money(&self, event_id: i64) -> Result<PrizeBreakdown, ApiError> {
        Client::prize_money(self, event_id).await
    }

    async fn round_format(&self, round: i32, season: i32) -> Result<RoundFormat, ApiError> {
        Client::round_format(self, round, season).await
    }

    async fn round_prizes(&self, event_id: i64) -> Result<RoundPrizes, ApiError> {
        Client::round_prizes(self, event_id).await
    }
}
