/// SectionHeader - renders a formatted section header with box characters
///
/// Shared by every panel so headers look the same everywhere.

use ratatui::{buffer::Buffer, layout::Rect, style::Style};
use crate::config::DisplayConfig;
use crate::formatting::format_header;

/// Renders a section header with an underline
///
/// Returns the number of lines rendered (height consumed)
pub fn render_section_header(
    text: &str,
    double_line: bool,
    margin: u16,
    area: Rect,
    y: u16,
    buf: &mut Buffer,
    config: &DisplayConfig,
) -> u16 {
    if y >= area.bottom() {
        return 0;
    }

    let header = format_header(text, double_line, config);
    let style = Style::default().fg(config.header_color());
    let mut lines_rendered = 0;

    for line in header.lines() {
        if y + lines_rendered >= area.bottom() {
            break;
        }
        buf.set_stringn(
            area.x + margin,
            y + lines_rendered,
            line,
            area.width.saturating_sub(margin) as usize,
            style,
        );
        lines_rendered += 1;
    }

    lines_rendered
}
