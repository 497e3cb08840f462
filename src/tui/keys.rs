/// Keyboard event to action mapping
///
/// This module handles converting crossterm KeyEvents into Actions.
/// It contains all the keyboard navigation logic for the TUI.
use crossterm::event::{KeyCode, KeyEvent};
use tracing::{debug, trace};

use super::action::{Action, CalendarAction, PanelAction, RankingsAction, SettingsAction};
use super::state::AppState;
use super::types::{Panel, Tab};

/// Handle global keys that work regardless of tab or focus state
fn handle_global_keys(key_code: KeyCode) -> Option<Action> {
    match key_code {
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Quit),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::RefreshData),
        _ => None,
    }
}

/// Handle ESC key with priority-based navigation up through focus hierarchy
fn handle_esc_key(state: &AppState) -> Option<Action> {
    if !state.navigation.panel_stack.is_empty() || state.navigation.content_focused {
        debug!("KEY: ESC pressed - navigating up");
        return Some(Action::NavigateUp);
    }

    debug!("KEY: ESC pressed at tab bar - ignoring (use 'q' to quit)");
    None
}

/// Handle direct tab switching via number keys (1-3)
fn handle_number_keys(key_code: KeyCode) -> Option<Action> {
    match key_code {
        KeyCode::Char(c) => c.to_digit(10).and_then(Tab::from_number).map(Action::NavigateTab),
        _ => None,
    }
}

/// Handle navigation when tab bar is focused (Left/Right/Down)
fn handle_tab_bar_navigation(key_code: KeyCode) -> Option<Action> {
    match key_code {
        KeyCode::Left => Some(Action::NavigateTabLeft),
        KeyCode::Right => Some(Action::NavigateTabRight),
        KeyCode::Down | KeyCode::Enter => {
            debug!("KEY: Down pressed on tab bar - entering content focus");
            Some(Action::EnterContentFocus)
        }
        _ => None,
    }
}

/// Keys for the panel on top of the stack
fn handle_panel_keys(panel: &Panel, key_code: KeyCode) -> Option<Action> {
    let panel_action = match (panel, key_code) {
        (Panel::Tournament { .. }, KeyCode::Down) => PanelAction::SelectNext,
        (Panel::Tournament { .. }, KeyCode::Up) => PanelAction::SelectPrev,
        (Panel::Tournament { .. }, KeyCode::Right) => PanelAction::NextFilter,
        (Panel::Tournament { .. }, KeyCode::Left) => PanelAction::PrevFilter,
        (Panel::Tournament { .. }, KeyCode::Enter) => PanelAction::OpenSelected,
        (Panel::Match { .. }, KeyCode::Char('1')) => PanelAction::OpenPlayer(1),
        (Panel::Match { .. }, KeyCode::Char('2')) => PanelAction::OpenPlayer(2),
        (Panel::Match { .. }, KeyCode::Char('h')) | (Panel::Match { .. }, KeyCode::Char('H')) => {
            PanelAction::OpenHeadToHead
        }
        _ => return None,
    };
    Some(Action::PanelAction(panel_action))
}

fn handle_calendar_keys(state: &AppState, key_code: KeyCode) -> Option<Action> {
    let action = match key_code {
        KeyCode::Left => CalendarAction::PrevTour,
        KeyCode::Right => CalendarAction::NextTour,
        KeyCode::Down => CalendarAction::SelectNext,
        KeyCode::Up if state.ui.calendar.selected_index == 0 => {
            return Some(Action::ExitContentFocus)
        }
        KeyCode::Up => CalendarAction::SelectPrev,
        KeyCode::Enter => CalendarAction::OpenSelected,
        _ => return None,
    };
    Some(Action::CalendarAction(action))
}

fn handle_rankings_keys(state: &AppState, key_code: KeyCode) -> Option<Action> {
    let action = match key_code {
        KeyCode::Left => RankingsAction::PrevType,
        KeyCode::Right => RankingsAction::NextType,
        KeyCode::Down => RankingsAction::SelectNext,
        KeyCode::Up if state.ui.rankings.selected_index == 0 => {
            return Some(Action::ExitContentFocus)
        }
        KeyCode::Up => RankingsAction::SelectPrev,
        KeyCode::Enter => RankingsAction::OpenSelected,
        _ => return None,
    };
    Some(Action::RankingsAction(action))
}

fn handle_settings_keys(state: &AppState, key_code: KeyCode) -> Option<Action> {
    let action = match key_code {
        KeyCode::Down => SettingsAction::SelectNext,
        KeyCode::Up if state.ui.settings.selected_index == 0 => {
            return Some(Action::ExitContentFocus)
        }
        KeyCode::Up => SettingsAction::SelectPrev,
        KeyCode::Left => SettingsAction::ChangeSelected { forward: false },
        KeyCode::Right | KeyCode::Enter | KeyCode::Char(' ') => {
            SettingsAction::ChangeSelected { forward: true }
        }
        _ => return None,
    };
    Some(Action::SettingsAction(action))
}

/// Convert a key event into an action for the current state
///
/// Priority: global keys, ESC, the open panel, number keys, then the tab bar
/// or the focused tab content.
pub fn key_to_action(key: KeyEvent, state: &AppState) -> Option<Action> {
    let current_tab = state.navigation.current_tab;
    let content_focused = state.navigation.content_focused;

    trace!(
        "KEY: {:?} (tab={:?}, content_focused={}, panel_stack_len={})",
        key.code,
        current_tab,
        content_focused,
        state.navigation.panel_stack.len()
    );

    // 1. Check global keys (q, r)
    if let Some(action) = handle_global_keys(key.code) {
        return Some(action);
    }

    // 2. Check ESC key
    if key.code == KeyCode::Esc {
        return handle_esc_key(state);
    }

    // 3. Route keys to the open panel
    if let Some(panel_state) = state.current_panel() {
        return handle_panel_keys(&panel_state.panel, key.code);
    }

    // 4. Check number keys for direct tab switching
    if let Some(action) = handle_number_keys(key.code) {
        return Some(action);
    }

    // 5. Handle navigation based on focus level
    if !content_focused {
        let action = handle_tab_bar_navigation(key.code);
        if action.is_some() {
            debug!("KEY: Tab bar navigation: {:?}", action);
        }
        return action;
    }

    match current_tab {
        Tab::Calendar => handle_calendar_keys(state, key.code),
        Tab::Rankings => handle_rankings_keys(state, key.code),
        Tab::Settings => handle_settings_keys(state, key.code),
    }
}
