use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Matches
// ---------------------------------------------------------------------------

/// A single match within an event, as returned by `/events/{id}/matches/`
/// and `/matches/{api_match_id}/`
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct MatchRecord {
    pub id: i64,
    pub api_match_id: Option<i64>,
    pub event_id: i64,
    pub round: Option<i32>,
    pub number: i32,
    pub player1_id: Option<i64>,
    pub player1_name: Option<String>,
    pub score1: Option<i32>,
    pub player2_id: Option<i64>,
    pub player2_name: Option<String>,
    pub score2: Option<i32>,
    pub winner_id: Option<i64>,
    pub status_code: Option<i32>,
    pub status_display: Option<String>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub frame_scores: Option<String>,
    pub sessions_str: Option<String>,
    pub on_break: Option<bool>,
    pub unfinished: Option<bool>,
    pub live_url: Option<String>,
    pub details_url: Option<String>,
    pub note: Option<String>,
}

impl MatchRecord {
    pub fn has_scores(&self) -> bool {
        self.score1.is_some() && self.score2.is_some()
    }

    /// Winner side (1 or 2) if the winner is one of the two players
    pub fn winner_side(&self) -> Option<u8> {
        let winner = self.winner_id?;
        if Some(winner) == self.player1_id {
            Some(1)
        } else if Some(winner) == self.player2_id {
            Some(2)
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Event (tournament) details from `/events/{id}/`
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct Event {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "StartDate")]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "EndDate")]
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "Sponsor")]
    pub sponsor: Option<String>,
    #[serde(rename = "Season")]
    pub season: Option<i32>,
    #[serde(rename = "Type")]
    pub event_type: Option<String>,
    #[serde(rename = "Venue")]
    pub venue: Option<String>,
    #[serde(rename = "City")]
    pub city: Option<String>,
    #[serde(rename = "Country")]
    pub country: Option<String>,
    #[serde(rename = "Tour")]
    pub tour: Option<String>,
    #[serde(rename = "NumCompetitors")]
    pub num_competitors: Option<i32>,
    #[serde(rename = "DefendingChampion")]
    pub defending_champion: Option<i64>,
    #[serde(rename = "Url")]
    pub url: Option<String>,
}

impl Event {
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("Event {}", self.id))
    }

    /// "Venue, City, Country" with missing parts skipped
    pub fn location(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.venue, &self.city, &self.country]
            .iter()
            .filter_map(|p| p.as_deref())
            .filter(|p| !p.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

/// Tournament row of the calendar endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TournamentSummary {
    pub id: i64,
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub tour: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub days_until: Option<i64>,
    #[serde(default)]
    pub days_ago: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct CalendarSummary {
    pub active_count: usize,
    pub upcoming_count: usize,
    pub recent_count: usize,
}

/// Tournaments grouped by status, from `/calendar/{tab}/`
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct Calendar {
    pub tab_type: String,
    pub tab_name: String,
    pub season: i32,
    pub summary: CalendarSummary,
    pub active: Vec<TournamentSummary>,
    pub upcoming: Vec<TournamentSummary>,
    pub recent: Vec<TournamentSummary>,
}

impl Calendar {
    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.upcoming.is_empty() && self.recent.is_empty()
    }

    /// All tournaments in display order: active, upcoming, recent
    pub fn tournaments(&self) -> impl Iterator<Item = &TournamentSummary> {
        self.active
            .iter()
            .chain(self.upcoming.iter())
            .chain(self.recent.iter())
    }
}

// ---------------------------------------------------------------------------
// Players and rankings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct Player {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "FirstName")]
    pub first_name: Option<String>,
    #[serde(rename = "MiddleName")]
    pub middle_name: Option<String>,
    #[serde(rename = "LastName")]
    pub last_name: Option<String>,
    #[serde(rename = "ShortName")]
    pub short_name: Option<String>,
    #[serde(rename = "Nationality")]
    pub nationality: Option<String>,
    #[serde(rename = "Sex")]
    pub sex: Option<String>,
    #[serde(rename = "Born")]
    pub born: Option<NaiveDate>,
    #[serde(rename = "FirstSeasonAsPro")]
    pub first_season_as_pro: Option<i32>,
    #[serde(rename = "LastSeasonAsPro")]
    pub last_season_as_pro: Option<i32>,
    #[serde(rename = "NumRankingTitles")]
    pub num_ranking_titles: Option<i32>,
    #[serde(rename = "NumMaximums")]
    pub num_maximums: Option<i32>,
}

impl Player {
    /// First, middle and last names joined; "Player {id}" when none are set
    pub fn full_name(&self) -> String {
        let parts: Vec<&str> = [&self.first_name, &self.middle_name, &self.last_name]
            .iter()
            .filter_map(|p| p.as_deref())
            .filter(|p| !p.is_empty())
            .collect();
        if parts.is_empty() {
            format!("Player {}", self.id)
        } else {
            parts.join(" ")
        }
    }

    /// Age in whole years on the given date
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        self.born.and_then(|born| today.years_since(born))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct RankingEntry {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "Position")]
    pub position: Option<i32>,
    #[serde(rename = "Player")]
    pub player_id: Option<i64>,
    #[serde(rename = "PlayerName", alias = "player_name")]
    pub player_name: Option<String>,
    #[serde(rename = "Nationality", alias = "nationality")]
    pub nationality: Option<String>,
    #[serde(rename = "Season")]
    pub season: Option<i32>,
    #[serde(rename = "Sum")]
    pub sum: Option<i64>,
    #[serde(rename = "Type")]
    pub ranking_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct RankingSummary {
    pub total_count: usize,
    pub men_count: usize,
    pub women_count: usize,
}

/// Ranking list from `/rankings/{type}/`
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct RankingTable {
    pub ranking_type: String,
    pub ranking_name: String,
    pub description: String,
    pub season: i32,
    pub summary: RankingSummary,
    pub rankings: Vec<RankingEntry>,
}

// ---------------------------------------------------------------------------
// Head to head and prize money
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct HeadToHeadMatch {
    #[serde(rename = "ID")]
    pub id: Option<i64>,
    #[serde(rename = "EventID")]
    pub event_id: Option<i64>,
    #[serde(rename = "Round")]
    pub round: Option<i32>,
    #[serde(rename = "Score1")]
    pub score1: Option<i32>,
    #[serde(rename = "Score2")]
    pub score2: Option<i32>,
    #[serde(rename = "WinnerID")]
    pub winner_id: Option<i64>,
    #[serde(rename = "StartDate")]
    pub start_date: Option<String>,
}

/// Head-to-head summary from `/h2h/{p1}/{p2}/`
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct HeadToHead {
    #[serde(rename = "Player1ID")]
    pub player1_id: i64,
    #[serde(rename = "Player1Name")]
    pub player1_name: Option<String>,
    #[serde(rename = "Player2ID")]
    pub player2_id: i64,
    #[serde(rename = "Player2Name")]
    pub player2_name: Option<String>,
    #[serde(rename = "Player1Wins")]
    pub player1_wins: u32,
    #[serde(rename = "Player2Wins")]
    pub player2_wins: u32,
    #[serde(rename = "TotalMeetings")]
    pub total_meetings: u32,
    #[serde(rename = "LastMeeting")]
    pub last_meeting: Option<String>,
    #[serde(rename = "LastResult")]
    pub last_result: Option<String>,
    #[serde(rename = "Matches")]
    pub matches: Vec<HeadToHeadMatch>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PrizeAmount {
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub formatted: Option<String>,
}

fn default_currency() -> String {
    "GBP".to_string()
}

impl PrizeAmount {
    pub fn display(&self) -> String {
        self.formatted
            .clone()
            .unwrap_or_else(|| format!("{} {:.0}", self.currency, self.amount))
    }
}

/// Winner / runner-up prize money from `/events/{id}/prize-money/`
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct PrizeBreakdown {
    pub winner: Option<PrizeAmount>,
    pub runner_up: Option<PrizeAmount>,
}

/// Match format and prize of one round of a season, from `/round-format/{round}/{season}/`
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct RoundFormat {
    #[serde(rename = "Round")]
    pub round: i32,
    #[serde(rename = "RoundName")]
    pub round_name: Option<String>,
    /// Event the backend picked for the season (active first, else most recent)
    #[serde(rename = "EventID")]
    pub event_id: Option<i64>,
    /// Frames needed to win the match
    #[serde(rename = "Distance")]
    pub distance: Option<i32>,
    #[serde(rename = "DistanceText")]
    pub distance_text: Option<String>,
    #[serde(rename = "Money")]
    pub money: Option<f64>,
    #[serde(rename = "ActualMoney")]
    pub actual_money: Option<f64>,
    #[serde(rename = "Currency")]
    pub currency: Option<String>,
    #[serde(rename = "Points")]
    pub points: Option<i32>,
}

impl RoundFormat {
    /// Total frames of the match, `distance * 2 - 1`
    pub fn best_of(&self) -> Option<i32> {
        self.distance.filter(|d| *d > 0).map(|d| d * 2 - 1)
    }

    pub fn format_text(&self) -> Option<String> {
        self.best_of()
            .map(|frames| format!("Best of {}", frames))
            .or_else(|| self.distance_text.clone().filter(|t| !t.is_empty()))
    }

    /// Whether this format may describe rounds of `event_id`
    pub fn applies_to(&self, event_id: i64) -> bool {
        self.event_id.map_or(true, |id| id == event_id)
    }
}

/// Formatted prize per round number, e.g. `{"7": "£1.2M"}`, from
/// `/events/{id}/round-prizes/`; rounds without prize money are absent
pub type RoundPrizes = BTreeMap<i32, String>;
