pub mod calendar;
pub mod h2h;
pub mod matches;
pub mod player;
pub mod rankings;

use crate::api::TournamentSummary;
use crate::formatting::{format_date_range, pad_right};

/// One calendar row: name, dates and place
pub fn format_tournament_line(t: &TournamentSummary) -> String {
    let place: Vec<&str> = [&t.city, &t.country]
        .iter()
        .filter_map(|p| p.as_deref())
        .filter(|p| !p.is_empty())
        .collect();
    format!(
        "{} {} {}",
        pad_right(&t.name, 32),
        pad_right(&format_date_range(t.start_date, t.end_date), 26),
        place.join(", ")
    )
    .trim_end()
    .to_string()
}
