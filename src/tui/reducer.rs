use tracing::debug;

use super::action::Action;
use super::effects::Effect;
use super::state::AppState;

use crate::tui::reducers::{
    reduce_calendar, reduce_data_loading, reduce_navigation, reduce_panel, reduce_rankings,
    reduce_settings,
};

/// Pure state reducer - like Redux reducer
///
/// Takes current state and an action, returns new state and an effect.
/// No I/O happens here: fetches and config saves come back as `Effect`s
/// to be executed by the runtime.
///
/// Ownership is passed through the sub-reducer chain to avoid cloning:
/// - Each sub-reducer returns Ok((state, effect)) if it handled the action
/// - Or Err(state) to pass ownership back for the next reducer to try
pub fn reduce(state: AppState, action: Action) -> (AppState, Effect) {
    // Navigation actions
    let state = match reduce_navigation(state, &action) {
        Ok(result) => return result,
        Err(state) => state,
    };

    // Data loading actions
    let state = match reduce_data_loading(state, &action) {
        Ok(result) => return result,
        Err(state) => state,
    };

    // Tab-specific action delegation
    match action {
        Action::CalendarAction(calendar_action) => reduce_calendar(state, calendar_action),
        Action::RankingsAction(rankings_action) => reduce_rankings(state, rankings_action),
        Action::PanelAction(panel_action) => reduce_panel(state, panel_action),
        Action::SettingsAction(settings_action) => reduce_settings(state, settings_action),

        Action::SetStatusMessage { message, is_error } => {
            let mut new_state = state;
            if is_error {
                new_state.system.set_status_error_message(message);
            } else {
                new_state.system.set_status_message(message);
            }
            (new_state, Effect::None)
        }

        Action::Error(message) => {
            debug!("ERROR: {}", message);
            let mut new_state = state;
            new_state.system.set_status_error_message(message);
            (new_state, Effect::None)
        }

        Action::Quit => (state, Effect::None),

        _ => (state, Effect::None),
    }
}
