use anyhow::{Context, Result};

use crate::api::{Calendar, CalendarTab, TournamentSummary};
use crate::cache;
use crate::commands::format_tournament_line;
use crate::config::DisplayConfig;
use crate::data_provider::SnookerDataProvider;
use crate::formatting::format_header;

/// "in 3 days", "ended yesterday" and similar
pub fn relative_note(t: &TournamentSummary) -> Option<String> {
    match (t.days_until, t.days_ago) {
        (Some(0), _) => Some("starts today".to_string()),
        (Some(1), _) => Some("starts tomorrow".to_string()),
        (Some(d), _) => Some(format!("in {} days", d)),
        (None, Some(0)) => Some("ended today".to_string()),
        (None, Some(1)) => Some("ended yesterday".to_string()),
        (None, Some(d)) => Some(format!("{} days ago", d)),
        (None, None) => None,
    }
}

fn format_section(title: &str, tournaments: &[TournamentSummary], display: &DisplayConfig) -> String {
    let mut output = format_header(&format!("{} ({})", title, tournaments.len()), false, display);
    if tournaments.is_empty() {
        output.push_str("  None\n");
    }
    for t in tournaments {
        let mut line = format!("  {}", format_tournament_line(t));
        if let Some(note) = relative_note(t) {
            line.push_str(&format!("  ({})", note));
        }
        output.push_str(&format!("{}  [{}]\n", line, t.id));
    }
    output
}

pub fn format_calendar(calendar: &Calendar, display: &DisplayConfig) -> String {
    let mut output = String::new();
    let title = if calendar.tab_name.is_empty() {
        format!("Season {}", calendar.season)
    } else {
        format!("{} - Season {}", calendar.tab_name, calendar.season)
    };
    output.push_str(&format_header(&title, true, display));
    output.push('\n');

    if calendar.is_empty() {
        output.push_str("No tournaments found.\n");
        return output;
    }

    output.push_str(&format_section("Active", &calendar.active, display));
    output.push('\n');
    output.push_str(&format_section("Upcoming", &calendar.upcoming, display));
    output.push('\n');
    output.push_str(&format_section("Recent", &calendar.recent, display));
    output
}

pub async fn run(
    client: &dyn SnookerDataProvider,
    tab: CalendarTab,
    season: Option<i32>,
    display: &DisplayConfig,
) -> Result<()> {
    let calendar = cache::fetch_calendar_cached(client, tab, season)
        .await
        .context("Failed to fetch calendar")?;
    print!("{}", format_calendar(&calendar, display));
    Ok(())
}
