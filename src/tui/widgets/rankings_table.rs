/// RankingsTable widget - ranking title, column header and a scrolling list
/// of ranking rows with a selectable player

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
};

use crate::api::{RankingTable, RankingType};
use crate::commands::rankings::{format_ranking_row, rankings_column_header, RANKINGS_WIDTH};
use crate::config::DisplayConfig;
use crate::tui::widgets::{
    render_lines, render_section_header, row_marker, scroll_offset, selection_style,
    RenderableWidget, StyledLine,
};

#[derive(Debug)]
pub struct RankingsTable<'a> {
    pub table: &'a RankingTable,
    pub ranking_type: RankingType,
    pub selected: usize,
    pub focused: bool,
}

impl RankingsTable<'_> {
    fn title(&self) -> String {
        let name = if self.table.ranking_name.is_empty() {
            self.ranking_type.info().name
        } else {
            self.table.ranking_name.as_str()
        };
        format!("{} - Season {}", name, self.table.season)
    }

    fn description(&self) -> &str {
        if self.table.description.is_empty() {
            self.ranking_type.info().description
        } else {
            &self.table.description
        }
    }

    fn build_rows(&self, config: &DisplayConfig) -> Vec<StyledLine> {
        self.table
            .rankings
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let is_selected = i == self.selected;
                let style = if is_selected {
                    selection_style(self.focused, config)
                } else {
                    Style::default()
                };
                (format!("{}{}", row_marker(is_selected, config), format_ranking_row(entry)), style)
            })
            .collect()
    }
}

impl RenderableWidget for RankingsTable<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig) {
        let mut y = area.y;
        y += render_section_header(&self.title(), true, 0, area, y, buf, config);
        if y < area.bottom() {
            buf.set_stringn(area.x, y, self.description(), area.width as usize, Style::default().fg(Color::DarkGray));
            y += 2;
        }
        if y >= area.bottom() {
            return;
        }

        if self.table.rankings.is_empty() {
            buf.set_stringn(area.x, y, "No rankings available.", area.width as usize, Style::default());
            return;
        }

        let header = format!(" {}", rankings_column_header());
        buf.set_stringn(area.x, y, &header, area.width as usize, Style::default().add_modifier(Modifier::BOLD));
        y += 1;
        if y < area.bottom() {
            let rule = format!(" {}", config.box_chars.horizontal.repeat(RANKINGS_WIDTH));
            buf.set_stringn(area.x, y, &rule, area.width as usize, Style::default());
            y += 1;
        }
        if y >= area.bottom() {
            return;
        }

        let rows = self.build_rows(config);
        let rows_area = Rect::new(area.x, y, area.width, area.bottom() - y);
        let offset = scroll_offset(Some(self.selected), rows.len(), rows_area.height as usize);
        render_lines(&rows, offset, rows_area, buf);
    }
}
