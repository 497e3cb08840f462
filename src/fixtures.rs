/// Mock fixture data for testing and development
///
/// This module provides consistent, deterministic fixture data that can be used for:
/// 1. Unit tests - ensuring tests have predictable data
/// 2. Development mock mode - running the app with fake data for screenshots and debugging
/// 3. Benchmarks - providing consistent data for performance testing
///
/// The fixtures model a UK Championship in progress with matches in every state.
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use crate::api::{
    Calendar, CalendarSummary, CalendarTab, Event, HeadToHead, HeadToHeadMatch, MatchRecord,
    Player, PrizeAmount, PrizeBreakdown, RankingEntry, RankingSummary, RankingTable, RankingType,
    RoundFormat, RoundPrizes, TournamentSummary,
};

pub const MOCK_SEASON: i32 = 2025;
pub const MOCK_ACTIVE_EVENT_ID: i64 = 2101;
pub const MOCK_UPCOMING_EVENT_ID: i64 = 2102;
pub const MOCK_RECENT_EVENT_ID: i64 = 2100;

/// (id, first name, last name, nationality, born)
const MOCK_PLAYERS: [(i64, &str, &str, &str, (i32, u32, u32)); 10] = [
    (5, "Judd", "Trump", "England", (1989, 8, 20)),
    (17, "Mark", "Selby", "England", (1983, 6, 19)),
    (12, "Ronnie", "O'Sullivan", "England", (1975, 12, 5)),
    (30, "Kyren", "Wilson", "England", (1991, 12, 23)),
    (39, "Neil", "Robertson", "Australia", (1982, 2, 11)),
    (97, "Shaun", "Murphy", "England", (1982, 8, 10)),
    (224, "Zhao", "Xintong", "China", (1997, 4, 3)),
    (1, "John", "Higgins", "Scotland", (1975, 5, 18)),
    (202, "Mark", "Williams", "Wales", (1975, 3, 21)),
    (2, "Ding", "Junhui", "China", (1987, 4, 1)),
];

fn player_name(id: i64) -> Option<String> {
    MOCK_PLAYERS
        .iter()
        .find(|p| p.0 == id)
        .map(|p| format!("{} {}", p.1, p.2))
}

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 11, 22, 13, 0, 0)
        .single()
        .unwrap_or_default()
}

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn tournament(id: i64, name: &str, start: Option<NaiveDate>, end: Option<NaiveDate>) -> TournamentSummary {
    TournamentSummary {
        id,
        name: name.to_string(),
        start_date: start,
        end_date: end,
        tour: Some("main".to_string()),
        venue: None,
        city: None,
        country: Some("United Kingdom".to_string()),
        days_until: None,
        days_ago: None,
    }
}

/// Calendar with one active, one upcoming and one recent tournament
pub fn create_mock_calendar(tab: CalendarTab, season: Option<i32>) -> Calendar {
    let mut active = tournament(MOCK_ACTIVE_EVENT_ID, "UK Championship", date(2025, 11, 22), date(2025, 11, 30));
    active.venue = Some("York Barbican".to_string());
    active.city = Some("York".to_string());

    let mut upcoming = tournament(MOCK_UPCOMING_EVENT_ID, "Scottish Open", date(2025, 12, 8), date(2025, 12, 14));
    upcoming.city = Some("Edinburgh".to_string());
    upcoming.days_until = Some(12);

    let mut recent = tournament(MOCK_RECENT_EVENT_ID, "Champion of Champions", date(2025, 11, 10), date(2025, 11, 16));
    recent.city = Some("Leicester".to_string());
    recent.days_ago = Some(6);

    let mut calendar = Calendar {
        tab_type: tab.as_str().to_string(),
        tab_name: tab.label().to_string(),
        season: season.unwrap_or(MOCK_SEASON),
        summary: CalendarSummary::default(),
        active: vec![active],
        upcoming: vec![upcoming],
        recent: vec![recent],
    };

    if tab == CalendarTab::Others {
        calendar.active.clear();
        let mut q_school = tournament(3001, "Q Tour Event 3", date(2025, 12, 1), date(2025, 12, 4));
        q_school.tour = Some("q".to_string());
        calendar.upcoming = vec![q_school];
        calendar.recent.clear();
    }

    calendar.summary = CalendarSummary {
        active_count: calendar.active.len(),
        upcoming_count: calendar.upcoming.len(),
        recent_count: calendar.recent.len(),
    };
    calendar
}

pub fn create_mock_event(event_id: i64) -> Event {
    let (name, start, end, city) = match event_id {
        MOCK_UPCOMING_EVENT_ID => ("Scottish Open", date(2025, 12, 8), date(2025, 12, 14), "Edinburgh"),
        MOCK_RECENT_EVENT_ID => ("Champion of Champions", date(2025, 11, 10), date(2025, 11, 16), "Leicester"),
        _ => ("UK Championship", date(2025, 11, 22), date(2025, 11, 30), "York"),
    };
    Event {
        id: event_id,
        name: Some(name.to_string()),
        start_date: start,
        end_date: end,
        sponsor: Some("MrQ".to_string()),
        season: Some(MOCK_SEASON),
        event_type: Some("Ranking".to_string()),
        venue: None,
        city: Some(city.to_string()),
        country: Some("United Kingdom".to_string()),
        tour: Some("main".to_string()),
        num_competitors: Some(128),
        defending_champion: Some(5),
        url: None,
    }
}

/// Build a match between two mock players
pub fn create_mock_match(
    id: i64,
    round: Option<i32>,
    number: i32,
    players: (i64, i64),
    status_code: i32,
    scores: Option<(i32, i32)>,
) -> MatchRecord {
    let scheduled = base_time() + Duration::hours(id % 24);
    let started = status_code > 0;
    let finished = status_code == 3;
    let winner_id = match (finished, scores) {
        (true, Some((s1, s2))) if s1 > s2 => Some(players.0),
        (true, Some(_)) => Some(players.1),
        _ => None,
    };

    MatchRecord {
        id,
        api_match_id: Some(8_840_000 + id),
        event_id: MOCK_ACTIVE_EVENT_ID,
        round,
        number,
        player1_id: Some(players.0),
        player1_name: player_name(players.0),
        score1: scores.map(|s| s.0),
        player2_id: Some(players.1),
        player2_name: player_name(players.1),
        score2: scores.map(|s| s.1),
        winner_id,
        status_code: Some(status_code),
        status_display: None,
        scheduled_date: Some(scheduled),
        start_date: started.then(|| scheduled + Duration::minutes(5)),
        end_date: finished.then(|| scheduled + Duration::hours(3)),
        frame_scores: started.then(|| "(64-21, 0-77, 131-0)".to_string()),
        sessions_str: Some(scheduled.format("%d.%m.%Y %H:%M").to_string()),
        on_break: Some(status_code == 2),
        unfinished: Some(false),
        live_url: None,
        details_url: None,
        note: None,
    }
}

/// Matches of the active event covering every status and several rounds
pub fn create_mock_event_matches(event_id: i64) -> Vec<MatchRecord> {
    let mut matches = vec![
        create_mock_match(1, Some(13), 1, (5, 17), 1, Some((3, 2))),
        create_mock_match(2, Some(13), 2, (12, 30), 2, Some((4, 4))),
        create_mock_match(3, Some(13), 3, (39, 97), 0, None),
        create_mock_match(4, Some(13), 4, (224, 1), 0, None),
        create_mock_match(5, Some(12), 1, (5, 202), 3, Some((6, 2))),
        create_mock_match(6, Some(12), 2, (17, 2), 3, Some((6, 5))),
        create_mock_match(7, Some(11), 1, (12, 1), 3, Some((6, 4))),
        create_mock_match(8, Some(11), 2, (30, 224), 3, Some((3, 6))),
    ];
    // A walkover row with an unmapped status code
    let mut odd = create_mock_match(9, None, 0, (97, 202), 9, None);
    odd.player2_name = None;
    matches.push(odd);

    for m in &mut matches {
        m.event_id = event_id;
    }
    matches
}

pub fn create_mock_player(player_id: i64) -> Player {
    let found = MOCK_PLAYERS.iter().find(|p| p.0 == player_id);
    match found {
        Some((id, first, last, nationality, (y, m, d))) => Player {
            id: *id,
            first_name: Some(first.to_string()),
            middle_name: None,
            last_name: Some(last.to_string()),
            short_name: Some(format!("{}. {}", &first[..1], last)),
            nationality: Some(nationality.to_string()),
            sex: Some("M".to_string()),
            born: NaiveDate::from_ymd_opt(*y, *m, *d),
            first_season_as_pro: Some(*y + 16),
            last_season_as_pro: None,
            num_ranking_titles: Some(((*id % 7) * 4) as i32),
            num_maximums: Some(((*id % 5) + 1) as i32),
        },
        None => Player {
            id: player_id,
            ..Default::default()
        },
    }
}

pub fn create_mock_rankings(ranking_type: RankingType, season: Option<i32>) -> RankingTable {
    let season = season.unwrap_or(MOCK_SEASON);
    let rankings: Vec<RankingEntry> = MOCK_PLAYERS
        .iter()
        .enumerate()
        .map(|(i, (id, first, last, nationality, _))| RankingEntry {
            id: 10_000 + i as i64,
            position: Some(i as i32 + 1),
            player_id: Some(*id),
            player_name: Some(format!("{} {}", first, last)),
            nationality: Some(nationality.to_string()),
            season: Some(season),
            sum: Some(1_250_000 - (i as i64) * 95_000),
            ranking_type: Some(ranking_type.as_str().to_string()),
        })
        .collect();

    let info = ranking_type.info();
    RankingTable {
        ranking_type: ranking_type.as_str().to_string(),
        ranking_name: info.name.to_string(),
        description: info.description.to_string(),
        season,
        summary: RankingSummary {
            total_count: rankings.len(),
            men_count: rankings.len(),
            women_count: 0,
        },
        rankings,
    }
}

pub fn create_mock_head_to_head(player1_id: i64, player2_id: i64) -> HeadToHead {
    let matches = vec![
        HeadToHeadMatch {
            id: Some(77001),
            event_id: Some(MOCK_RECENT_EVENT_ID),
            round: Some(15),
            score1: Some(10),
            score2: Some(7),
            winner_id: Some(player1_id),
            start_date: Some("2025-11-16".to_string()),
        },
        HeadToHeadMatch {
            id: Some(76002),
            event_id: Some(1900),
            round: Some(13),
            score1: Some(3),
            score2: Some(5),
            winner_id: Some(player2_id),
            start_date: Some("2025-02-11".to_string()),
        },
        HeadToHeadMatch {
            id: Some(75003),
            event_id: Some(1800),
            round: Some(14),
            score1: Some(6),
            score2: Some(4),
            winner_id: Some(player1_id),
            start_date: Some("2024-12-06".to_string()),
        },
    ];
    HeadToHead {
        player1_id,
        player1_name: player_name(player1_id),
        player2_id,
        player2_name: player_name(player2_id),
        player1_wins: 2,
        player2_wins: 1,
        total_meetings: 3,
        last_meeting: Some("2025-11-16".to_string()),
        last_result: Some("10-7".to_string()),
        matches,
    }
}

pub fn create_mock_prize_money(event_id: i64) -> PrizeBreakdown {
    if event_id == MOCK_UPCOMING_EVENT_ID {
        return PrizeBreakdown::default();
    }
    PrizeBreakdown {
        winner: Some(PrizeAmount {
            amount: 250_000.0,
            currency: "GBP".to_string(),
            formatted: Some("£250,000".to_string()),
        }),
        runner_up: Some(PrizeAmount {
            amount: 100_000.0,
            currency: "GBP".to_string(),
            formatted: Some("£100,000".to_string()),
        }),
    }
}

/// Round formats of the mock season, all attributed to the active event
///
/// Rounds outside 7..=15, or of another season, have no format.
pub fn create_mock_round_format(round: i32, season: i32) -> Option<RoundFormat> {
    if season != MOCK_SEASON {
        return None;
    }
    let (name, distance, money) = match round {
        15 => ("Final", 10, 250_000.0),
        14 => ("Semi-Finals", 9, 100_000.0),
        13 => ("Quarter-Finals", 6, 50_000.0),
        12 => ("Last 16", 6, 25_000.0),
        11 => ("Last 32", 6, 15_000.0),
        7..=10 => ("Qualifying", 6, 0.0),
        _ => return None,
    };
    Some(RoundFormat {
        round,
        round_name: Some(name.to_string()),
        event_id: Some(MOCK_ACTIVE_EVENT_ID),
        distance: Some(distance),
        distance_text: None,
        money: Some(money),
        actual_money: None,
        currency: Some("GBP".to_string()),
        points: Some(money as i32),
    })
}

pub fn create_mock_round_prizes(event_id: i64) -> RoundPrizes {
    if event_id == MOCK_UPCOMING_EVENT_ID {
        return RoundPrizes::new();
    }
    [(11, "£15K"), (12, "£25K"), (13, "£50K"), (14, "£100K"), (15, "£250K")]
        .into_iter()
        .map(|(round, prize)| (round, prize.to_string()))
        .collect()
}
