/// MatchDetail widget - scoreline, status, frame scores, sessions and note
/// for a single match

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
};

use crate::api::MatchRecord;
use crate::config::DisplayConfig;
use crate::formatting::{
    format_local_datetime, format_score, match_display_time, parse_frame_scores, parse_sessions,
    player_display_name,
};
use crate::match_list::{round_label, MatchCategory};
use crate::tui::widgets::{render_lines, render_section_header, RenderableWidget, StyledLine};

#[derive(Debug)]
pub struct MatchDetail<'a> {
    pub record: &'a MatchRecord,
    pub time_format: &'a str,
}

impl MatchDetail<'_> {
    fn player1(&self) -> &str {
        player_display_name(self.record.player1_name.as_deref())
    }

    fn player2(&self) -> &str {
        player_display_name(self.record.player2_name.as_deref())
    }

    fn status_line(&self, config: &DisplayConfig) -> StyledLine {
        let m = self.record;
        match MatchCategory::from_status_code(m.status_code) {
            MatchCategory::Live => (
                format!("{} Live", config.box_chars.live_marker),
                Style::default().fg(config.live_fg),
            ),
            MatchCategory::OnBreak => ("On break".to_string(), Style::default()),
            MatchCategory::Upcoming => {
                let when = match_display_time(m)
                    .map(|t| format_local_datetime(&t, self.time_format))
                    .unwrap_or_else(|| "TBD".to_string());
                (format!("Upcoming, {}", when), Style::default())
            }
            MatchCategory::Finished => {
                let text = match m.winner_side() {
                    Some(1) => format!("Finished, winner {}", self.player1()),
                    Some(_) => format!("Finished, winner {}", self.player2()),
                    None => "Finished".to_string(),
                };
                (text, Style::default())
            }
        }
    }

    fn frame_lines(&self) -> Vec<StyledLine> {
        let frames = self
            .record
            .frame_scores
            .as_deref()
            .map(parse_frame_scores)
            .unwrap_or_default();
        if frames.is_empty() {
            return vec![("  No frame scores yet".to_string(), Style::default().fg(Color::DarkGray))];
        }
        frames
            .iter()
            .enumerate()
            .map(|(i, (p1, p2))| {
                let style = if p1 > p2 {
                    Style::default().add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                (format!("  Frame {:<3} {:>3} - {:<3}", i + 1, p1, p2), style)
            })
            .collect()
    }

    fn session_lines(&self) -> Vec<StyledLine> {
        let sessions = self
            .record
            .sessions_str
            .as_deref()
            .map(parse_sessions)
            .unwrap_or_default();
        if sessions.is_empty() {
            return vec![("  No sessions scheduled".to_string(), Style::default().fg(Color::DarkGray))];
        }
        sessions
            .iter()
            .map(|s| (format!("  {}", format_local_datetime(s, self.time_format)), Style::default()))
            .collect()
    }
}

impl RenderableWidget for MatchDetail<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig) {
        let m = self.record;
        let mut y = area.y;
        let title = format!("{} - Match {}", round_label(m.round), m.number);
        y += render_section_header(&title, true, 0, area, y, buf, config);

        let mut lines: Vec<StyledLine> = vec![
            (
                format!("{}  {}  {}", self.player1(), format_score(m), self.player2()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            self.status_line(config),
            (String::new(), Style::default()),
        ];
        render_lines(&lines, 0, Rect::new(area.x, y, area.width, area.bottom().saturating_sub(y)), buf);
        y += lines.len() as u16;

        y += render_section_header("Frames", false, 0, area, y, buf, config);
        lines = self.frame_lines();
        lines.push((String::new(), Style::default()));
        render_lines(&lines, 0, Rect::new(area.x, y, area.width, area.bottom().saturating_sub(y)), buf);
        y += lines.len() as u16;

        y += render_section_header("Sessions", false, 0, area, y, buf, config);
        lines = self.session_lines();
        lines.push((String::new(), Style::default()));
        if let Some(note) = m.note.as_deref().filter(|n| !n.trim().is_empty()) {
            lines.push((format!("Note: {}", note.trim()), Style::default()));
            lines.push((String::new(), Style::default()));
        }
        lines.push((
            format!("1: {}  2: {}  h: head-to-head", self.player1(), self.player2()),
            Style::default().fg(Color::DarkGray),
        ));
        render_lines(&lines, 0, Rect::new(area.x, y, area.width, area.bottom().saturating_sub(y)), buf);
    }
}
