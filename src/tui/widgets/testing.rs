/// Testing utilities for widget rendering
///
/// This module provides helper functions for testing widgets in isolation.

use ratatui::{buffer::Buffer, layout::Rect};
use crate::config::DisplayConfig;
use super::RenderableWidget;

/// Create a test DisplayConfig with unicode box characters and no theme
pub fn test_config() -> DisplayConfig {
    DisplayConfig::default()
}

/// Create a test DisplayConfig with ASCII box characters
pub fn test_config_ascii() -> DisplayConfig {
    let mut config = DisplayConfig::default();
    config.set_use_unicode(false);
    config
}

/// Render a widget to a buffer and return it for testing
pub fn render_widget(widget: &impl RenderableWidget, width: u16, height: u16) -> Buffer {
    render_widget_with_config(widget, width, height, &test_config())
}

/// Render a widget to a buffer with a custom config
pub fn render_widget_with_config(
    widget: &impl RenderableWidget,
    width: u16,
    height: u16,
    config: &DisplayConfig,
) -> Buffer {
    let mut buf = Buffer::empty(Rect::new(0, 0, width, height));
    widget.render(buf.area, &mut buf, config);
    buf
}

/// Get the text content of a specific line in the buffer
pub fn buffer_line(buf: &Buffer, line: u16) -> String {
    let area = buf.area();
    let mut output = String::new();

    for x in 0..area.width {
        output.push_str(buf[(x, line)].symbol());
    }

    output
}

/// All lines of the buffer with trailing spaces removed
pub fn buffer_lines(buf: &Buffer) -> Vec<String> {
    (0..buf.area().height)
        .map(|y| buffer_line(buf, y).trim_end().to_string())
        .collect()
}

/// Assert that a buffer line matches the expected string
pub fn assert_buffer_line(buf: &Buffer, line: u16, expected: &str) {
    let actual = buffer_line(buf, line);
    assert_eq!(
        actual, expected,
        "\nLine {} mismatch:\nExpected: {}\nActual:   {}",
        line, expected, actual
    );
}

/// Index of the first line containing `needle`
pub fn find_line(buf: &Buffer, needle: &str) -> Option<u16> {
    (0..buf.area().height).find(|&y| buffer_line(buf, y).contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Style;

    struct TestWidget {
        text: String,
    }

    impl RenderableWidget for TestWidget {
        fn render(&self, area: Rect, buf: &mut Buffer, _config: &DisplayConfig) {
            buf.set_string(area.x, area.y, &self.text, Style::default());
        }
    }

    #[test]
    fn test_render_widget() {
        let widget = TestWidget {
            text: "Hello".to_string(),
        };

        let buf = render_widget(&widget, 10, 2);

        assert_buffer_line(&buf, 0, "Hello     ");
        assert_eq!(buffer_lines(&buf), vec!["Hello".to_string(), String::new()]);
        assert_eq!(find_line(&buf, "ell"), Some(0));
    }

    #[test]
    fn test_config_variants() {
        assert_eq!(test_config().box_chars.horizontal, "─");
        assert_eq!(test_config_ascii().box_chars.horizontal, "-");
    }
}
