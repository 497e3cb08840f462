/// Widget-based rendering infrastructure for TUI
///
/// Widgets render themselves directly into a ratatui Buffer and can be tested
/// in isolation against a test buffer.

#[cfg(test)]
pub mod testing;

pub mod breadcrumb;
pub mod event_header;
pub mod head_to_head;
pub mod match_detail;
pub mod match_table;
pub mod message;
pub mod player_card;
pub mod rankings_table;
pub mod section_header;
pub mod settings_list;
pub mod status_bar;
pub mod tab_bar;
pub mod tournament_list;

pub use breadcrumb::Breadcrumb;
pub use event_header::EventHeader;
pub use head_to_head::HeadToHeadView;
pub use match_detail::MatchDetail;
pub use match_table::MatchTable;
pub use message::Message;
pub use player_card::PlayerCard;
pub use rankings_table::RankingsTable;
pub use section_header::render_section_header;
pub use settings_list::SettingsList;
pub use status_bar::StatusBar;
pub use tab_bar::TabBar;
pub use tournament_list::TournamentList;

use ratatui::{buffer::Buffer, layout::Rect, style::Style};
use crate::config::DisplayConfig;

/// Core trait for renderable widgets
///
/// This trait is object-safe, so different widget types can be stored
/// behind `&dyn RenderableWidget`.
pub trait RenderableWidget {
    /// Render this widget into the provided buffer
    ///
    /// # Arguments
    ///
    /// * `area` - The rectangular area to render into
    /// * `buf` - The buffer to write to
    /// * `config` - Display configuration (colors, box chars, etc.)
    fn render(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig);

    /// Get the preferred height of this widget
    ///
    /// Returns None if the widget can adapt to any height.
    fn preferred_height(&self) -> Option<u16> {
        None
    }
}

/// A line of text drawn with a single style
pub type StyledLine = (String, Style);

/// First line to draw so that the `selected` line stays visible
pub fn scroll_offset(selected: Option<usize>, total: usize, height: usize) -> usize {
    match selected {
        Some(sel) if height > 0 && sel >= height => {
            (sel + 1 - height).min(total.saturating_sub(height))
        }
        _ => 0,
    }
}

/// Draw `lines` starting at `offset`, clipped to `area`
pub fn render_lines(lines: &[StyledLine], offset: usize, area: Rect, buf: &mut Buffer) {
    for (row, (text, style)) in lines
        .iter()
        .skip(offset)
        .take(area.height as usize)
        .enumerate()
    {
        buf.set_stringn(area.x, area.y + row as u16, text, area.width as usize, *style);
    }
}

/// Style of the selected row
pub fn selection_style(focused: bool, config: &DisplayConfig) -> Style {
    if focused {
        Style::default().fg(config.selection_color())
    } else {
        Style::default().fg(config.unfocused_selection_color())
    }
}

/// One-column marker in front of a list row
pub fn row_marker(selected: bool, config: &DisplayConfig) -> &str {
    if selected {
        &config.box_chars.selector
    } else {
        " "
    }
}
