use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
};

use crate::api::{Event, PrizeBreakdown};
use crate::commands::matches::format_event_header;
use crate::config::DisplayConfig;
use crate::tui::widgets::{render_lines, RenderableWidget, StyledLine};

/// Tournament panel header: name, dates, location and prize money
#[derive(Debug)]
pub struct EventHeader<'a> {
    pub event: &'a Event,
    pub prize: Option<&'a PrizeBreakdown>,
}

impl EventHeader<'_> {
    fn build_lines(&self, config: &DisplayConfig) -> Vec<StyledLine> {
        let header_style = Style::default().fg(config.header_color());
        format_event_header(self.event, self.prize, config)
            .lines()
            .enumerate()
            .map(|(i, line)| {
                let style = match i {
                    0 | 1 => header_style,
                    _ => Style::default().fg(Color::Gray),
                };
                (line.to_string(), style)
            })
            .collect()
    }

    /// Lines the header occupies, including a trailing blank line
    pub fn height(&self, config: &DisplayConfig) -> u16 {
        self.build_lines(config).len() as u16 + 1
    }
}

impl RenderableWidget for EventHeader<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig) {
        render_lines(&self.build_lines(config), 0, area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{
        create_mock_event, create_mock_prize_money, MOCK_ACTIVE_EVENT_ID, MOCK_UPCOMING_EVENT_ID,
    };
    use crate::tui::widgets::testing::*;

    #[test]
    fn test_event_header_with_prize_money() {
        let event = create_mock_event(MOCK_ACTIVE_EVENT_ID);
        let prize = create_mock_prize_money(MOCK_ACTIVE_EVENT_ID);
        let widget = EventHeader {
            event: &event,
            prize: Some(&prize),
        };
        let buf = render_widget(&widget, 60, 5);
        let lines = buffer_lines(&buf);

        assert_eq!(lines[0], "UK Championship");
        assert_eq!(lines[3], "Prize money: Winner £250,000, Runner-up £100,000");
        assert_eq!(widget.height(&test_config()), 5);
        assert_eq!(buf[(0, 0)].fg, test_config().header_color());
    }

    #[test]
    fn test_event_header_without_prize_money() {
        let event = create_mock_event(MOCK_UPCOMING_EVENT_ID);
        let widget = EventHeader { event: &event, prize: None };
        assert_eq!(widget.height(&test_config()), 4);
    }
}
