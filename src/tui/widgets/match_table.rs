/// MatchTable widget - a categorized match list with status and round headers
///
/// Header rows are not selectable; `selected` counts match rows only.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};

use crate::config::DisplayConfig;
use crate::formatting::format_match_line;
use crate::match_list::{round_header_label, MatchCategory, MatchListEntry, RoundInfo};
use crate::tui::widgets::{
    render_lines, row_marker, scroll_offset, selection_style, RenderableWidget, StyledLine,
};

#[derive(Debug)]
pub struct MatchTable<'a> {
    pub entries: &'a [MatchListEntry],
    pub selected: Option<usize>,
    pub focused: bool,
    pub time_format: &'a str,
    /// Best-of format and prize appended to round headers
    pub rounds: Option<&'a RoundInfo>,
}

impl MatchTable<'_> {
    fn build_lines(&self, config: &DisplayConfig) -> (Vec<StyledLine>, Option<usize>) {
        let mut lines: Vec<StyledLine> = Vec::new();
        let mut selected_line = None;
        let mut match_index = 0;

        for entry in self.entries {
            match entry {
                MatchListEntry::StatusHeader { category, count } => {
                    if !lines.is_empty() {
                        lines.push((String::new(), Style::default()));
                    }
                    lines.push((
                        format!("{} ({})", category.label(), count),
                        Style::default().fg(config.header_color()),
                    ));
                }
                MatchListEntry::RoundHeader { round, name, .. } => {
                    let label = round_header_label(name, *round, self.rounds);
                    lines.push((format!("  {}", label), Style::default().add_modifier(Modifier::BOLD)));
                }
                MatchListEntry::Match { category, record } => {
                    let is_selected = self.selected == Some(match_index);
                    let line = format_match_line(record, *category, self.time_format, config);
                    let text = format!(
                        "{}{}",
                        row_marker(is_selected, config),
                        line.strip_prefix(' ').unwrap_or(&line)
                    );
                    let style = if is_selected {
                        selected_line = Some(lines.len());
                        selection_style(self.focused, config)
                    } else if *category == MatchCategory::Live {
                        Style::default().fg(config.live_fg)
                    } else {
                        Style::default()
                    };
                    lines.push((text, style));
                    match_index += 1;
                }
            }
        }
        (lines, selected_line)
    }
}

impl RenderableWidget for MatchTable<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig) {
        if self.entries.is_empty() {
            buf.set_stringn(area.x + 2, area.y + 1, "No matches found.", area.width.saturating_sub(2) as usize, Style::default());
            return;
        }
        let (lines, selected_line) = self.build_lines(config);
        let offset = scroll_offset(selected_line, lines.len(), area.height as usize);
        render_lines(&lines, offset, area, buf);
    }
}
