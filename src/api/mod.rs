//! Client and wire models for the MaxBreak snooker REST API

pub mod client;
pub mod error;
pub mod models;
pub mod params;

pub use client::{Client, DEFAULT_BASE_URL};
pub use error::{ApiError, Result};
pub use models::{
    Calendar, CalendarSummary, Event, HeadToHead, HeadToHeadMatch, MatchRecord, Player,
    PrizeAmount, PrizeBreakdown, RankingEntry, RankingSummary, RankingTable, RoundFormat,
    RoundPrizes, TournamentSummary,
};
pub use params::{CalendarTab, RankingType};
