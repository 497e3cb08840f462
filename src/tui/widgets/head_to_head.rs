use ratatui::{buffer::Buffer, layout::Rect, style::Style};

use crate::api::HeadToHead;
use crate::commands::h2h::format_head_to_head;
use crate::config::DisplayConfig;
use crate::tui::widgets::{render_lines, RenderableWidget, StyledLine};

/// Head-to-head summary between two players, laid out like the `h2h` command
#[derive(Debug)]
pub struct HeadToHeadView<'a> {
    pub h2h: &'a HeadToHead,
}

impl RenderableWidget for HeadToHeadView<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig) {
        let text = format_head_to_head(self.h2h, config);
        let raw: Vec<&str> = text.lines().collect();
        let header_style = Style::default().fg(config.header_color());

        // Headers are the lines directly above an underline
        let is_rule = |line: &str| {
            !line.is_empty()
                && line.chars().all(|c| {
                    config.box_chars.horizontal.contains(c) || config.box_chars.double_horizontal.contains(c)
                })
        };
        let lines: Vec<StyledLine> = raw
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let next_is_rule = raw.get(i + 1).is_some_and(|next| is_rule(next));
                let style = if is_rule(line) || next_is_rule {
                    header_style
                } else {
                    Style::default()
                };
                (line.to_string(), style)
            })
            .collect();

        render_lines(&lines, 0, area, buf);
    }
}
