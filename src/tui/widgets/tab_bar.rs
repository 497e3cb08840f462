/// TabBar widget - a horizontal row of labels with an underline
///
/// Used for the main navigation tabs and for the sub-tabs inside a view
/// (tour, ranking type, match filter). Labels are separated by the vertical
/// box character and the underline carries a connector under each gap.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
};
use unicode_width::UnicodeWidthStr;

use crate::config::DisplayConfig;
use crate::tui::widgets::RenderableWidget;

#[derive(Debug)]
pub struct TabBar {
    pub labels: Vec<String>,
    pub selected: usize,
    pub focused: bool,
}

impl TabBar {
    pub fn new<S: Into<String>>(labels: impl IntoIterator<Item = S>, selected: usize, focused: bool) -> Self {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            selected,
            focused,
        }
    }

    /// Get the base style based on focus state
    fn base_style(&self) -> Style {
        if self.focused {
            Style::default()
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    /// Get the style for a tab based on selection and focus state
    fn tab_style(&self, index: usize, config: &DisplayConfig) -> Style {
        let base_style = self.base_style();
        if index != self.selected {
            return base_style;
        }
        if self.focused {
            base_style.fg(config.selection_color())
        } else {
            base_style.fg(config.unfocused_selection_color())
        }
    }

    /// Build the tab line with separators
    fn build_tab_line(&self, config: &DisplayConfig) -> Vec<(String, Style)> {
        let separator = format!(" {} ", config.box_chars.vertical);
        let mut segments = Vec::new();

        for (i, label) in self.labels.iter().enumerate() {
            if i > 0 {
                segments.push((separator.clone(), self.base_style()));
            }
            segments.push((label.clone(), self.tab_style(i, config)));
        }

        segments
    }

    /// Build the separator line with connectors under tab gaps
    fn build_separator_line(&self, area_width: usize, config: &DisplayConfig) -> String {
        let horizontal = &config.box_chars.horizontal;
        let mut line = String::new();
        let mut pos = 0;

        for (i, label) in self.labels.iter().enumerate() {
            if i > 0 {
                line.push_str(horizontal);
                line.push_str(&config.box_chars.bottom_junction);
                line.push_str(horizontal);
                pos += 3;
            }
            line.push_str(&horizontal.repeat(label.width()));
            pos += label.width();
        }

        if pos < area_width {
            line.push_str(&horizontal.repeat(area_width - pos));
        }
        line
    }
}

impl RenderableWidget for TabBar {
    fn render(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig) {
        if self.labels.is_empty() || area.width == 0 || area.height < 2 {
            return;
        }

        let mut x = area.x;
        for (text, style) in self.build_tab_line(config) {
            if x >= area.right() {
                break;
            }
            buf.set_stringn(x, area.y, &text, (area.right() - x) as usize, style);
            x += text.width() as u16;
        }

        let separator = self.build_separator_line(area.width as usize, config);
        buf.set_stringn(area.x, area.y + 1, &separator, area.width as usize, self.base_style());
    }

    fn preferred_height(&self) -> Option<u16> {
        Some(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::testing::*;

    fn main_tabs(selected: usize, focused: bool) -> TabBar {
        TabBar::new(["Calendar", "Rankings", "Settings"], selected, focused)
    }

    #[test]
    fn test_tab_bar_basic_rendering() {
        let buf = render_widget(&main_tabs(0, true), 40, 2);

        assert_buffer_line(&buf, 0, "Calendar │ Rankings │ Settings          ");
        assert_buffer_line(&buf, 1, "─────────┴──────────┴───────────────────");
    }

    #[test]
    fn test_tab_bar_focused_selection_colour() {
        let buf = render_widget(&main_tabs(1, true), 40, 2);
        let config = test_config();

        let start = buffer_line(&buf, 0).chars().position(|c| c == 'R').unwrap_or(0);
        assert_eq!(buf[(start as u16, 0)].fg, config.selection_color());
    }

    #[test]
    fn test_tab_bar_unfocused() {
        let buf = render_widget(&main_tabs(0, false), 40, 2);
        let config = test_config();

        assert_eq!(buf[(0, 0)].fg, config.unfocused_selection_color());
        assert_eq!(buf[(12, 0)].fg, Color::DarkGray);
    }

    #[test]
    fn test_tab_bar_ascii() {
        let buf = render_widget_with_config(&TabBar::new(["Main", "Other"], 0, true), 16, 2, &test_config_ascii());

        assert_buffer_line(&buf, 0, "Main | Other    ");
        assert_buffer_line(&buf, 1, "-----+----------");
    }

    #[test]
    fn test_tab_bar_empty_and_small() {
        let empty = render_widget(&TabBar::new(Vec::<String>::new(), 0, true), 10, 2);
        assert_eq!(buffer_line(&empty, 0).trim(), "");

        let small = render_widget(&main_tabs(0, true), 10, 2);
        assert_buffer_line(&small, 0, "Calendar │");
        assert_eq!(render_widget(&main_tabs(0, true), 10, 1).area.height, 1);
    }
}
