/// Breadcrumb widget - the trail of open panels above a drill-down view
///
/// Format: "▸ Calendar ▸ UK Championship ▸ Quarter-Finals #1"

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
};
use unicode_width::UnicodeWidthStr;

use crate::config::DisplayConfig;
use crate::tui::widgets::RenderableWidget;

const ELLIPSIS: &str = "...";

#[derive(Debug, Default)]
pub struct Breadcrumb {
    pub items: Vec<String>,
}

impl Breadcrumb {
    pub fn new(items: Vec<String>) -> Self {
        Self { items }
    }

    fn icon(config: &DisplayConfig) -> &'static str {
        if config.use_unicode {
            "▸"
        } else {
            ">"
        }
    }

    /// Segments to draw; when the full trail does not fit only the last item
    /// is kept behind an ellipsis
    fn segments(&self, width: usize, config: &DisplayConfig) -> Vec<(String, Style)> {
        let icon = Self::icon(config);
        let separator = format!(" {} ", icon);
        let dim = Style::default().fg(Color::DarkGray);
        let last_style = Style::default().add_modifier(Modifier::BOLD);

        let mut segments = vec![(format!("{} ", icon), dim)];
        let last_index = self.items.len().saturating_sub(1);
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                segments.push((separator.clone(), dim));
            }
            let style = if i == last_index { last_style } else { Style::default() };
            segments.push((item.clone(), style));
        }

        let full_width: usize = segments.iter().map(|(s, _)| s.width()).sum();
        if full_width <= width {
            return segments;
        }

        match self.items.last() {
            Some(last) => vec![
                (format!("{} {}", icon, ELLIPSIS), dim),
                (separator, dim),
                (last.clone(), last_style),
            ],
            None => Vec::new(),
        }
    }
}

impl RenderableWidget for Breadcrumb {
    fn render(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig) {
        if self.items.is_empty() || area.width == 0 || area.height == 0 {
            return;
        }

        let mut x = area.x;
        for (text, style) in self.segments(area.width as usize, config) {
            if x >= area.right() {
                break;
            }
            buf.set_stringn(x, area.y, &text, (area.right() - x) as usize, style);
            x += text.width() as u16;
        }
    }

    fn preferred_height(&self) -> Option<u16> {
        Some(1)
    }
}
