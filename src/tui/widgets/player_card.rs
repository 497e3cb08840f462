use chrono::NaiveDate;
use ratatui::{buffer::Buffer, layout::Rect, style::Style};

use crate::api::Player;
use crate::commands::player::player_bio_rows;
use crate::config::DisplayConfig;
use crate::tui::widgets::{render_section_header, RenderableWidget};

/// Player bio card: name header followed by label/value rows
#[derive(Debug)]
pub struct PlayerCard<'a> {
    pub player: &'a Player,
    /// Date used to compute the player's age
    pub today: NaiveDate,
}

impl RenderableWidget for PlayerCard<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig) {
        let mut y = area.y;
        y += render_section_header(&self.player.full_name(), true, 0, area, y, buf, config);

        let rows = player_bio_rows(self.player, self.today);
        if rows.is_empty() && y < area.bottom() {
            buf.set_stringn(area.x, y, "No details available.", area.width as usize, Style::default());
            return;
        }

        let label_style = Style::default().fg(config.header_color());
        for (label, value) in rows {
            if y >= area.bottom() {
                break;
            }
            buf.set_stringn(area.x, y, format!("{}:", label), area.width as usize, label_style);
            if area.width > 16 {
                buf.set_stringn(area.x + 16, y, &value, (area.width - 16) as usize, Style::default());
            }
            y += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::create_mock_player;
    use crate::tui::widgets::testing::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 26).unwrap()
    }

    #[test]
    fn test_player_card_rows() {
        let player = create_mock_player(12);
        let buf = render_widget(&PlayerCard { player: &player, today: today() }, 50, 8);
        let lines = buffer_lines(&buf);

        assert_eq!(lines[0], "Ronnie O'Sullivan");
        assert_eq!(lines[2], "Nationality:    England");
        assert_eq!(lines[3], "Born:           5 December 1975 (age 49)");
        assert_eq!(buf[(0, 2)].fg, test_config().header_color());
    }

    #[test]
    fn test_player_card_without_details() {
        let player = Player { id: 4, ..Default::default() };
        let lines = buffer_lines(&render_widget(&PlayerCard { player: &player, today: today() }, 40, 4));

        assert_eq!(lines[0], "Player 4");
        assert_eq!(lines[2], "No details available.");
    }
}
