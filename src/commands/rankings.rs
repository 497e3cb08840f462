use anyhow::{Context, Result};

use crate::api::{RankingEntry, RankingTable, RankingType};
use crate::cache;
use crate::config::DisplayConfig;
use crate::data_provider::SnookerDataProvider;
use crate::formatting::{format_header, format_thousands, pad_left, pad_right};

/// Width of a ranking row: position, player, nationality and points columns
pub const RANKINGS_WIDTH: usize = 63;

pub fn rankings_column_header() -> String {
    format!(
        "{} {} {} {}",
        pad_left("Pos", 4),
        pad_right("Player", 28),
        pad_right("Nationality", 16),
        pad_left("Points", 12)
    )
}

pub fn format_ranking_row(entry: &RankingEntry) -> String {
    let pos = entry.position.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string());
    let player = entry
        .player_name
        .clone()
        .or_else(|| entry.player_id.map(|id| format!("Player {}", id)))
        .unwrap_or_else(|| "Unknown".to_string());
    let points = entry.sum.map(format_thousands).unwrap_or_default();
    format!(
        "{} {} {} {}",
        pad_left(&pos, 4),
        pad_right(&player, 28),
        pad_right(entry.nationality.as_deref().unwrap_or(""), 16),
        pad_left(&points, 12)
    )
    .trim_end()
    .to_string()
}

pub fn format_rankings(table: &RankingTable, ranking_type: RankingType, display: &DisplayConfig) -> String {
    let info = ranking_type.info();
    let name = if table.ranking_name.is_empty() {
        info.name
    } else {
        table.ranking_name.as_str()
    };
    let description = if table.description.is_empty() {
        info.description
    } else {
        table.description.as_str()
    };

    let mut output = format_header(&format!("{} - Season {}", name, table.season), true, display);
    output.push_str(description);
    output.push_str("\n\n");

    if table.rankings.is_empty() {
        output.push_str("No rankings available.\n");
        return output;
    }

    output.push_str(&rankings_column_header());
    output.push('\n');
    output.push_str(&display.box_chars.horizontal.repeat(RANKINGS_WIDTH));
    output.push('\n');

    for entry in &table.rankings {
        output.push_str(&format_ranking_row(entry));
        output.push('\n');
    }
    output
}

pub async fn run(
    client: &dyn SnookerDataProvider,
    ranking_type: RankingType,
    season: Option<i32>,
    display: &DisplayConfig,
) -> Result<()> {
    let table = cache::fetch_rankings_cached(client, ranking_type, season)
        .await
        .with_context(|| format!("Failed to fetch {} rankings", ranking_type))?;
    print!("{}", format_rankings(&table, ranking_type, display));
    Ok(())
}
