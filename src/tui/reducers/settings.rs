use tracing::debug;

use crate::api::CalendarTab;
use crate::config::{Config, THEMES};
use crate::tui::action::{Action, SettingsAction};
use crate::tui::effects::Effect;
use crate::tui::state::AppState;
use crate::tui::types::SettingsItem;

/// Refresh intervals offered on the settings tab, in seconds
pub const REFRESH_INTERVALS: [u32; 6] = [15, 30, 60, 120, 300, 600];

pub fn reduce_settings(state: AppState, action: SettingsAction) -> (AppState, Effect) {
    match action {
        SettingsAction::SelectNext => {
            let mut new_state = state;
            let selected = &mut new_state.ui.settings.selected_index;
            if *selected + 1 < SettingsItem::ALL.len() {
                *selected += 1;
            }
            (new_state, Effect::None)
        }

        SettingsAction::SelectPrev => {
            let mut new_state = state;
            let selected = &mut new_state.ui.settings.selected_index;
            *selected = selected.saturating_sub(1);
            (new_state, Effect::None)
        }

        SettingsAction::ChangeSelected { forward } => {
            let Some(item) = SettingsItem::ALL.get(state.ui.settings.selected_index).copied()
            else {
                return (state, Effect::None);
            };
            let mut new_state = state;
            change_setting(&mut new_state.system.config, item, forward);
            debug!(
                "SETTINGS: {} -> {}",
                item.label(),
                setting_value(&new_state.system.config, item)
            );
            let effect = save_config_effect(new_state.system.config.clone());
            (new_state, effect)
        }
    }
}

fn cycle<T: PartialEq + Copy>(options: &[T], current: T, forward: bool) -> T {
    let len = options.len();
    match options.iter().position(|o| *o == current) {
        Some(i) if forward => options[(i + 1) % len],
        Some(i) => options[(i + len - 1) % len],
        None => options[0],
    }
}

fn change_setting(config: &mut Config, item: SettingsItem, forward: bool) {
    match item {
        SettingsItem::Theme => {
            // "no theme" sits before the named themes
            let mut names: Vec<Option<&'static str>> = vec![None];
            names.extend(THEMES.iter().map(|t| Some(t.name)));
            let current = config.display.theme.as_ref().map(|t| t.name);
            let next = cycle(&names, current, forward);
            config.display.apply_theme(next);
        }
        SettingsItem::UseUnicode => {
            let use_unicode = !config.display.use_unicode;
            config.display.set_use_unicode(use_unicode);
        }
        SettingsItem::RefreshInterval => {
            config.refresh_interval = cycle(&REFRESH_INTERVALS, config.refresh_interval, forward);
        }
        SettingsItem::DefaultTour => {
            let tour = cycle(&CalendarTab::ALL, config.default_tab(), forward);
            config.default_tour = tour.as_str().to_string();
        }
    }
}

/// Display value of a setting
pub fn setting_value(config: &Config, item: SettingsItem) -> String {
    match item {
        SettingsItem::Theme => config
            .display
            .theme
            .as_ref()
            .map(|t| t.name.to_string())
            .unwrap_or_else(|| "none".to_string()),
        SettingsItem::UseUnicode => if config.display.use_unicode { "on" } else { "off" }.to_string(),
        SettingsItem::RefreshInterval => format!("{}s", config.refresh_interval),
        SettingsItem::DefaultTour => config.default_tab().label().to_string(),
    }
}

fn save_config_effect(config: Config) -> Effect {
    Effect::Async(Box::pin(async move {
        match crate::config::write(&config) {
            Ok(_) => {
                debug!("CONFIG: Successfully saved to disk");
                Action::SetStatusMessage {
                    message: "Configuration saved".to_string(),
                    is_error: false,
                }
            }
            Err(e) => {
                debug!("CONFIG: Failed to save: {}", e);
                Action::SetStatusMessage {
                    message: format!("Failed to save config: {}", e),
                    is_error: true,
                }
            }
        }
    }))
}
