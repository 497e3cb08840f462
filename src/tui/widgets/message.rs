/// Message widget - a single indented line for loading, empty and error states

use ratatui::{buffer::Buffer, layout::Rect, style::{Color, Style}};

use crate::config::DisplayConfig;
use crate::tui::widgets::RenderableWidget;

#[derive(Debug)]
pub struct Message {
    pub text: String,
    pub is_error: bool,
}

impl Message {
    pub fn loading(what: &str) -> Self {
        Self {
            text: format!("Loading {}...", what),
            is_error: false,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    /// An error with a hint that `r` retries the failed fetch
    pub fn error(text: &str) -> Self {
        Self {
            text: format!("{} (press r to retry)", text),
            is_error: true,
        }
    }
}

impl RenderableWidget for Message {
    fn render(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig) {
        if area.height < 2 || area.width < 3 {
            return;
        }
        let style = if self.is_error {
            Style::default().fg(config.error_fg)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        buf.set_stringn(area.x + 2, area.y + 1, &self.text, (area.width - 2) as usize, style);
    }

    fn preferred_height(&self) -> Option<u16> {
        Some(2)
    }
}
