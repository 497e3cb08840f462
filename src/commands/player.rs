use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};

use crate::api::Player;
use crate::cache;
use crate::config::DisplayConfig;
use crate::data_provider::SnookerDataProvider;
use crate::formatting::format_header;

/// Label/value rows of a player's bio, shared by the CLI and the player panel
pub fn player_bio_rows(player: &Player, today: NaiveDate) -> Vec<(&'static str, String)> {
    let mut rows = Vec::new();
    if let Some(nationality) = &player.nationality {
        rows.push(("Nationality", nationality.clone()));
    }
    if let Some(born) = player.born {
        let age = player
            .age_on(today)
            .map(|a| format!(" (age {})", a))
            .unwrap_or_default();
        rows.push(("Born", format!("{}{}", born.format("%-d %B %Y"), age)));
    }
    match (player.first_season_as_pro, player.last_season_as_pro) {
        (Some(first), Some(last)) => rows.push(("Professional", format!("{} - {}", first, last))),
        (Some(first), None) => rows.push(("Turned pro", first.to_string())),
        _ => {}
    }
    if let Some(titles) = player.num_ranking_titles {
        rows.push(("Ranking titles", titles.to_string()));
    }
    if let Some(maximums) = player.num_maximums {
        rows.push(("147s", maximums.to_string()));
    }
    rows
}

pub fn format_player(player: &Player, today: NaiveDate, display: &DisplayConfig) -> String {
    let mut output = format_header(&player.full_name(), true, display);
    let rows = player_bio_rows(player, today);
    if rows.is_empty() {
        output.push_str("No details available.\n");
    }
    for (label, value) in rows {
        output.push_str(&format!("{:<16}{}\n", format!("{}:", label), value));
    }
    output
}

pub async fn run(client: &dyn SnookerDataProvider, player_id: i64, display: &DisplayConfig) -> Result<()> {
    let player = cache::fetch_player_cached(client, player_id)
        .await
        .with_context(|| format!("Failed to fetch player {}", player_id))?;
    print!("{}", format_player(&player, Local::now().date_naive(), display));
    Ok(())
}
