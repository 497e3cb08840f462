/// SettingsList widget - editable settings with their current values
///
/// Rendered as "Label  ‹ value ›" rows; the selected row is highlighted.

use ratatui::{buffer::Buffer, layout::Rect, style::{Color, Style}};

use crate::config::{Config, DisplayConfig};
use crate::formatting::pad_right;
use crate::tui::reducers::settings::setting_value;
use crate::tui::types::SettingsItem;
use crate::tui::widgets::{row_marker, selection_style, RenderableWidget};

const LABEL_WIDTH: usize = 22;

#[derive(Debug)]
pub struct SettingsList<'a> {
    pub config: &'a Config,
    pub selected: usize,
    pub focused: bool,
}

impl RenderableWidget for SettingsList<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig) {
        let mut y = area.y;
        for (index, item) in SettingsItem::ALL.iter().enumerate() {
            if y >= area.bottom() {
                break;
            }
            let is_selected = self.focused && index == self.selected;
            let text = format!(
                " {} {}< {} >",
                row_marker(is_selected, config),
                pad_right(item.label(), LABEL_WIDTH),
                setting_value(self.config, *item)
            );
            let style = if is_selected {
                selection_style(true, config)
            } else {
                Style::default()
            };
            buf.set_stringn(area.x, y, &text, area.width as usize, style);
            y += 1;
        }

        y += 1;
        if y < area.bottom() {
            buf.set_stringn(
                area.x,
                y,
                "  ←/→ change value. Changes are saved immediately.",
                area.width as usize,
                Style::default().fg(Color::DarkGray),
            );
        }
    }

    fn preferred_height(&self) -> Option<u16> {
        Some(SettingsItem::ALL.len() as u16 + 2)
    }
}
