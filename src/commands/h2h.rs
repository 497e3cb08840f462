use anyhow::{Context, Result};

use crate::api::HeadToHead;
use crate::cache;
use crate::config::DisplayConfig;
use crate::data_provider::SnookerDataProvider;
use crate::formatting::format_header;
use crate::match_list::round_name;

fn name_or_id(name: &Option<String>, id: i64) -> String {
    name.clone().unwrap_or_else(|| format!("Player {}", id))
}

pub fn format_head_to_head(h2h: &HeadToHead, display: &DisplayConfig) -> String {
    let p1 = name_or_id(&h2h.player1_name, h2h.player1_id);
    let p2 = name_or_id(&h2h.player2_name, h2h.player2_id);

    let mut output = format_header(&format!("{} v {}", p1, p2), true, display);
    if h2h.total_meetings == 0 {
        output.push_str("No previous meetings.\n");
        return output;
    }

    output.push_str(&format!(
        "{} {} - {} {}  ({} meetings)\n",
        p1, h2h.player1_wins, h2h.player2_wins, p2, h2h.total_meetings
    ));
    if let Some(last) = &h2h.last_meeting {
        let result = h2h
            .last_result
            .as_deref()
            .map(|r| format!(", {}", r))
            .unwrap_or_default();
        output.push_str(&format!("Last meeting: {}{}\n", last, result));
    }

    if !h2h.matches.is_empty() {
        output.push('\n');
        output.push_str(&format_header("Meetings", false, display));
        for m in &h2h.matches {
            let score = match (m.score1, m.score2) {
                (Some(a), Some(b)) => format!("{}-{}", a, b),
                _ => "-".to_string(),
            };
            let winner = match m.winner_id {
                Some(id) if id == h2h.player1_id => p1.as_str(),
                Some(id) if id == h2h.player2_id => p2.as_str(),
                _ => "",
            };
            output.push_str(
                format!(
                    "  {:<10}  {:<15} {:>5}  {}",
                    m.start_date.as_deref().unwrap_or(""),
                    m.round.map(round_name).unwrap_or_default(),
                    score,
                    winner
                )
                .trim_end(),
            );
            output.push('\n');
        }
    }
    output
}

pub async fn run(
    client: &dyn SnookerDataProvider,
    player1_id: i64,
    player2_id: i64,
    display: &DisplayConfig,
) -> Result<()> {
    let h2h = cache::fetch_head_to_head_cached(client, player1_id, player2_id)
        .await
        .with_context(|| format!("Failed to fetch head-to-head {} v {}", player1_id, player2_id))?;
    print!("{}", format_head_to_head(&h2h, display));
    Ok(())
}
