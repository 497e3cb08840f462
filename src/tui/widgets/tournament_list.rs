/// TournamentList widget - the calendar grouped into active, upcoming and
/// recent sections with a selectable row per tournament

use ratatui::{buffer::Buffer, layout::Rect, style::Style};

use crate::api::{Calendar, TournamentSummary};
use crate::commands::calendar::relative_note;
use crate::commands::format_tournament_line;
use crate::config::DisplayConfig;
use crate::tui::widgets::{
    render_lines, row_marker, scroll_offset, selection_style, RenderableWidget, StyledLine,
};

#[derive(Debug)]
pub struct TournamentList<'a> {
    pub calendar: &'a Calendar,
    /// Index into `Calendar::tournaments()`
    pub selected: usize,
    pub focused: bool,
}

impl TournamentList<'_> {
    /// Lines to draw and the line holding the selected tournament
    fn build_lines(&self, config: &DisplayConfig) -> (Vec<StyledLine>, Option<usize>) {
        let mut lines = Vec::new();
        let mut selected_line = None;
        let mut index = 0;
        let header_style = Style::default().fg(config.header_color());

        let sections: [(&str, &Vec<TournamentSummary>); 3] = [
            ("Active", &self.calendar.active),
            ("Upcoming", &self.calendar.upcoming),
            ("Recent", &self.calendar.recent),
        ];
        for (title, tournaments) in sections {
            if !lines.is_empty() {
                lines.push((String::new(), Style::default()));
            }
            lines.push((format!("{} ({})", title, tournaments.len()), header_style));
            if tournaments.is_empty() {
                lines.push(("   None".to_string(), Style::default()));
            }
            for t in tournaments {
                let is_selected = index == self.selected;
                let mut text = format!(" {} {}", row_marker(is_selected, config), format_tournament_line(t));
                if let Some(note) = relative_note(t) {
                    text.push_str(&format!("  ({})", note));
                }
                let style = if is_selected {
                    selected_line = Some(lines.len());
                    selection_style(self.focused, config)
                } else {
                    Style::default()
                };
                lines.push((text, style));
                index += 1;
            }
        }
        (lines, selected_line)
    }
}

impl RenderableWidget for TournamentList<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig) {
        if self.calendar.is_empty() {
            buf.set_stringn(area.x + 2, area.y + 1, "No tournaments found.", area.width.saturating_sub(2) as usize, Style::default());
            return;
        }
        let (lines, selected_line) = self.build_lines(config);
        let offset = scroll_offset(selected_line, lines.len(), area.height as usize);
        render_lines(&lines, offset, area, buf);
    }
}
