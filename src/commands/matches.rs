use anyhow::{Context, Result};

use crate::api::{Event, PrizeBreakdown};
use crate::cache;
use crate::config::DisplayConfig;
use crate::data_provider::SnookerDataProvider;
use crate::formatting::{format_date_range, format_header, format_match_line};
use crate::match_list::{
    categorize_matches, filter_category, round_header_label, MatchCategory, MatchListEntry, RoundInfo,
};

pub fn format_event_header(event: &Event, prize: Option<&PrizeBreakdown>, display: &DisplayConfig) -> String {
    let mut output = format_header(&event.display_name(), true, display);
    output.push_str(&format_date_range(event.start_date, event.end_date));
    if let Some(location) = event.location() {
        output.push_str(&format!("  {}", location));
    }
    output.push('\n');
    if let Some(prize) = prize {
        let mut parts = Vec::new();
        if let Some(w) = &prize.winner {
            parts.push(format!("Winner {}", w.display()));
        }
        if let Some(r) = &prize.runner_up {
            parts.push(format!("Runner-up {}", r.display()));
        }
        if !parts.is_empty() {
            output.push_str(&format!("Prize money: {}\n", parts.join(", ")));
        }
    }
    output
}

/// Render a categorized match list as text, with round details in the round headers
pub fn format_match_list(
    entries: &[MatchListEntry],
    rounds: Option<&RoundInfo>,
    time_format: &str,
    display: &DisplayConfig,
) -> String {
    if entries.is_empty() {
        return "No matches found.\n".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        match entry {
            MatchListEntry::StatusHeader { category, count } => {
                if !output.is_empty() {
                    output.push('\n');
                }
                output.push_str(&format_header(&format!("{} ({})", category.label(), count), false, display));
            }
            MatchListEntry::RoundHeader { round, name, .. } => {
                output.push_str(&format!("{}\n", round_header_label(name, *round, rounds)));
            }
            MatchListEntry::Match { category, record } => {
                output.push_str(&format_match_line(record, *category, time_format, display));
                output.push('\n');
            }
        }
    }
    output
}

pub async fn run(
    client: &dyn SnookerDataProvider,
    event_id: i64,
    status: Option<MatchCategory>,
    time_format: &str,
    display: &DisplayConfig,
) -> Result<()> {
    let event = cache::fetch_event_cached(client, event_id)
        .await
        .with_context(|| format!("Failed to fetch event {}", event_id))?;
    let matches = cache::fetch_event_matches_cached(client, event_id)
        .await
        .with_context(|| format!("Failed to fetch matches for event {}", event_id))?;
    // Prize money is optional decoration
    let prize = cache::fetch_prize_money_cached(client, event_id).await.ok();
    let rounds = cache::fetch_round_info(client, event_id, None).await.ok();

    let mut entries = categorize_matches(&matches);
    if let Some(category) = status {
        entries = filter_category(&entries, category);
    }

    print!("{}", format_event_header(&event, prize.as_ref(), display));
    println!();
    print!("{}", format_match_list(&entries, rounds.as_ref(), time_format, display));
    Ok(())
}
