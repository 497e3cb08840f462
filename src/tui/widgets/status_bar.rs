/// StatusBar widget - displays the status message and refresh countdown
///
/// This widget renders a two-line status bar with:
/// - Top line: horizontal separator with a connector above the vertical bar
/// - Bottom line: left status message (or error) │ right refresh countdown

use std::time::Duration;

use ratatui::{buffer::Buffer, layout::Rect, style::Style};
use unicode_width::UnicodeWidthStr;

use crate::config::DisplayConfig;
use crate::formatting::truncate;
use crate::tui::widgets::RenderableWidget;

#[derive(Debug, Default)]
pub struct StatusBar {
    /// Message on the left side
    pub message: Option<String>,
    /// Render the message in the error colour
    pub is_error: bool,
    /// Time until the next periodic refresh, `None` before the first one
    pub next_refresh_in: Option<Duration>,
    /// Any fetch still in flight
    pub loading: bool,
}

impl StatusBar {
    /// Build the right side text
    fn build_right_text(&self) -> String {
        if self.loading {
            return "Loading...".to_string();
        }
        match self.next_refresh_in {
            None => "---".to_string(),
            Some(d) if d.as_secs() == 0 => "Refreshing...".to_string(),
            Some(d) => format!("Refresh in {}s", d.as_secs()),
        }
    }

    /// Build the top separator line with connector
    fn build_separator_line(&self, area_width: usize, bar_position: usize, config: &DisplayConfig) -> String {
        format!(
            "{}{}{}",
            config.box_chars.horizontal.repeat(bar_position),
            config.box_chars.top_junction,
            config
                .box_chars
                .horizontal
                .repeat(area_width.saturating_sub(bar_position + 1))
        )
    }
}

impl RenderableWidget for StatusBar {
    fn render(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig) {
        if area.width == 0 || area.height < 2 {
            return;
        }

        let right_text = self.build_right_text();
        // Layout: [space][message][padding]│[space][right_text][space]
        let bar_position = (area.width as usize).saturating_sub(right_text.width() + 3);

        let separator = self.build_separator_line(area.width as usize, bar_position, config);
        buf.set_stringn(area.x, area.y, &separator, area.width as usize, Style::default());

        if let Some(message) = &self.message {
            let style = if self.is_error {
                Style::default().fg(config.error_fg)
            } else {
                Style::default()
            };
            let text = truncate(message, bar_position.saturating_sub(2));
            buf.set_string(area.x + 1, area.y + 1, &text, style);
        }

        let right = format!("{} {} ", config.box_chars.vertical, right_text);
        let x = area.x + bar_position as u16;
        buf.set_stringn(x, area.y + 1, &right, (area.right() - x) as usize, Style::default());
    }

    fn preferred_height(&self) -> Option<u16> {
        Some(2)
    }
}
