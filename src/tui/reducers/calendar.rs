use tracing::debug;

use super::data_loading::ensure_loaded;
use super::navigation::push_panel;
use crate::tui::action::CalendarAction;
use crate::tui::effects::Effect;
use crate::tui::state::{AppState, LoadingKey};
use crate::tui::types::Panel;

pub fn reduce_calendar(state: AppState, action: CalendarAction) -> (AppState, Effect) {
    match action {
        CalendarAction::NextTour | CalendarAction::PrevTour => {
            let mut new_state = state;
            let current = new_state.ui.calendar.tour;
            let tour = if action == CalendarAction::NextTour {
                current.next()
            } else {
                current.prev()
            };
            debug!("CALENDAR: Switching tour {} -> {}", current, tour);
            new_state.ui.calendar.tour = tour;
            new_state.ui.calendar.selected_index = 0;
            let effect = ensure_loaded(&mut new_state, LoadingKey::Calendar(tour));
            (new_state, effect)
        }

        CalendarAction::SelectNext => {
            let mut new_state = state;
            let count = tournament_count(&new_state);
            let selected = &mut new_state.ui.calendar.selected_index;
            if *selected + 1 < count {
                *selected += 1;
            }
            (new_state, Effect::None)
        }

        CalendarAction::SelectPrev => {
            let mut new_state = state;
            let selected = &mut new_state.ui.calendar.selected_index;
            *selected = selected.saturating_sub(1);
            (new_state, Effect::None)
        }

        CalendarAction::OpenSelected => match selected_tournament_id(&state) {
            Some(event_id) => push_panel(state, Panel::Tournament { event_id }),
            None => (state, Effect::None),
        },
    }
}

fn tournament_count(state: &AppState) -> usize {
    state
        .data
        .calendars
        .get(&state.ui.calendar.tour)
        .map(|c| c.tournaments().count())
        .unwrap_or(0)
}

/// Event id of the highlighted tournament in the visible calendar
pub fn selected_tournament_id(state: &AppState) -> Option<i64> {
    state
        .data
        .calendars
        .get(&state.ui.calendar.tour)?
        .tournaments()
        .nth(state.ui.calendar.selected_index)
        .map(|t| t.id)
}
