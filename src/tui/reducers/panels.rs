use tracing::debug;

use super::navigation::push_panel;
use crate::match_list::match_positions;
use crate::tui::action::PanelAction;
use crate::tui::effects::Effect;
use crate::tui::state::AppState;
use crate::tui::types::Panel;

/// Handle actions aimed at the panel on top of the stack
pub fn reduce_panel(state: AppState, action: PanelAction) -> (AppState, Effect) {
    let Some(panel) = state.current_panel().map(|p| p.panel.clone()) else {
        return (state, Effect::None);
    };

    match panel {
        Panel::Tournament { event_id } => reduce_tournament_panel(state, event_id, action),
        Panel::Match {
            event_id,
            match_id,
            api_match_id,
        } => reduce_match_panel(state, event_id, match_id, api_match_id, action),
        Panel::Player { .. } | Panel::HeadToHead { .. } => (state, Effect::None),
    }
}

fn reduce_tournament_panel(
    state: AppState,
    event_id: i64,
    action: PanelAction,
) -> (AppState, Effect) {
    let mut new_state = state;
    let data = &new_state.data;
    let Some(panel_state) = new_state.navigation.panel_stack.last_mut() else {
        return (new_state, Effect::None);
    };

    match action {
        PanelAction::NextFilter | PanelAction::PrevFilter => {
            panel_state.filter = if action == PanelAction::NextFilter {
                panel_state.filter.next()
            } else {
                panel_state.filter.prev()
            };
            debug!("PANEL: Match filter {}", panel_state.filter.label());
            let count = match_positions(&data.match_entries(event_id, panel_state.filter)).len();
            panel_state.selected_index = (count > 0).then_some(0);
            (new_state, Effect::None)
        }

        PanelAction::SelectNext => {
            let count = match_positions(&data.match_entries(event_id, panel_state.filter)).len();
            if count > 0 {
                let next = panel_state.selected_index.map(|i| i + 1).unwrap_or(0);
                panel_state.selected_index = Some(next.min(count - 1));
            }
            (new_state, Effect::None)
        }

        PanelAction::SelectPrev => {
            if let Some(i) = panel_state.selected_index {
                panel_state.selected_index = Some(i.saturating_sub(1));
            }
            (new_state, Effect::None)
        }

        PanelAction::OpenSelected => {
            let entries = data.match_entries(event_id, panel_state.filter);
            let selected = panel_state
                .selected_index
                .and_then(|i| match_positions(&entries).get(i).copied())
                .and_then(|pos| entries.get(pos))
                .and_then(|entry| entry.as_match())
                .map(|m| (m.id, m.api_match_id));
            match selected {
                Some((match_id, api_match_id)) => push_panel(
                    new_state,
                    Panel::Match {
                        event_id,
                        match_id,
                        api_match_id,
                    },
                ),
                None => (new_state, Effect::None),
            }
        }

        PanelAction::OpenPlayer(_) | PanelAction::OpenHeadToHead => (new_state, Effect::None),
    }
}

fn reduce_match_panel(
    state: AppState,
    event_id: i64,
    match_id: i64,
    api_match_id: Option<i64>,
    action: PanelAction,
) -> (AppState, Effect) {
    let players = state
        .data
        .find_match(event_id, match_id, api_match_id)
        .map(|m| (m.player1_id, m.player2_id));
    let Some((player1_id, player2_id)) = players else {
        return (state, Effect::None);
    };

    let panel = match action {
        PanelAction::OpenPlayer(1) => player1_id.map(|player_id| Panel::Player { player_id }),
        PanelAction::OpenPlayer(2) => player2_id.map(|player_id| Panel::Player { player_id }),
        PanelAction::OpenHeadToHead => match (player1_id, player2_id) {
            (Some(player1_id), Some(player2_id)) => Some(Panel::HeadToHead {
                player1_id,
                player2_id,
            }),
            _ => None,
        },
        _ => return (state, Effect::None),
    };

    match panel {
        Some(panel) => push_panel(state, panel),
        None => {
            let mut new_state = state;
            new_state
                .system
                .set_status_error_message("Player not yet decided".to_string());
            (new_state, Effect::None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{create_mock_event_matches, create_mock_match};
    use crate::match_list::{MatchCategory, MatchFilter};
    use crate::tui::state::PanelState;
    use std::sync::Arc;

    const EVENT: i64 = 2101;

    fn tournament_state() -> AppState {
        let mut state = AppState::default();
        Arc::make_mut(&mut state.data.event_matches).insert(EVENT, create_mock_event_matches(EVENT));
        state
            .navigation
            .panel_stack
            .push(PanelState::new(Panel::Tournament { event_id: EVENT }));
        state
    }

    fn top(state: &AppState) -> &PanelState {
        state.current_panel().expect("panel open")
    }

    #[test]
    fn test_no_panel_is_a_no_op() {
        let (state, effect) = reduce_panel(AppState::default(), PanelAction::SelectNext);
        assert!(state.navigation.panel_stack.is_empty());
        assert!(matches!(effect, Effect::None));
    }

    #[test]
    fn test_filter_cycles_and_resets_selection() {
        let mut state = tournament_state();
        state.navigation.panel_stack[0].selected_index = Some(3);

        let (state, _) = reduce_panel(state, PanelAction::NextFilter);
        assert_eq!(top(&state).filter, MatchFilter::Only(MatchCategory::Live));
        assert_eq!(top(&state).selected_index, Some(0));

        let (state, _) = reduce_panel(state, PanelAction::PrevFilter);
        let (state, _) = reduce_panel(state, PanelAction::PrevFilter);
        assert_eq!(top(&state).filter, MatchFilter::Only(MatchCategory::Finished));
    }

    #[test]
    fn test_selection_is_bounded_by_matches() {
        let mut state = tournament_state();
        for _ in 0..20 {
            state = reduce_panel(state, PanelAction::SelectNext).0;
        }
        assert_eq!(top(&state).selected_index, Some(8));

        let mut state = state;
        for _ in 0..20 {
            state = reduce_panel(state, PanelAction::SelectPrev).0;
        }
        assert_eq!(top(&state).selected_index, Some(0));
    }

    #[test]
    fn test_open_selected_match_skips_headers() {
        let state = tournament_state();

        let (state, effect) = reduce_panel(state, PanelAction::OpenSelected);

        // first selectable row is the live match with id 1
        assert_eq!(
            top(&state).panel,
            Panel::Match {
                event_id: EVENT,
                match_id: 1,
                api_match_id: Some(8_840_001)
            }
        );
        assert!(matches!(
            effect,
            Effect::FetchMatch {
                api_match_id: 8_840_001,
                force: false
            }
        ));
    }

    #[test]
    fn test_match_panel_opens_players_and_head_to_head() {
        let (state, _) = reduce_panel(tournament_state(), PanelAction::OpenSelected);

        let (with_player, _) = reduce_panel(state.clone(), PanelAction::OpenPlayer(2));
        assert_eq!(top(&with_player).panel, Panel::Player { player_id: 17 });

        let (with_h2h, effect) = reduce_panel(state, PanelAction::OpenHeadToHead);
        assert_eq!(
            top(&with_h2h).panel,
            Panel::HeadToHead {
                player1_id: 5,
                player2_id: 17
            }
        );
        assert!(matches!(effect, Effect::FetchHeadToHead(5, 17)));
    }

    #[test]
    fn test_match_panel_with_undecided_player() {
        let mut state = tournament_state();
        Arc::make_mut(&mut state.data.event_matches)
            .get_mut(&EVENT)
            .expect("matches")
            .iter_mut()
            .for_each(|m| m.player2_id = None);
        state.navigation.panel_stack.push(PanelState::new(Panel::Match {
            event_id: EVENT,
            match_id: 1,
            api_match_id: Some(8_840_001),
        }));

        let (state, effect) = reduce_panel(state, PanelAction::OpenHeadToHead);

        assert_eq!(state.navigation.panel_stack.len(), 2);
        assert!(state.system.status_is_error);
        assert!(matches!(effect, Effect::None));
    }

    #[test]
    fn test_open_match_without_api_id_resolves_by_row_id() {
        // row 5 has no API id yet; row 9 carries API id 5
        let mut unassigned = create_mock_match(5, Some(1), 1, (5, 17), 1, None);
        unassigned.api_match_id = None;
        unassigned.event_id = EVENT;
        let mut colliding = create_mock_match(9, Some(1), 2, (12, 30), 1, None);
        colliding.api_match_id = Some(5);
        colliding.event_id = EVENT;

        let mut state = AppState::default();
        Arc::make_mut(&mut state.data.event_matches)
            .insert(EVENT, vec![colliding.clone(), unassigned]);
        // single-match data for the other match is already cached under API id 5
        Arc::make_mut(&mut state.data.matches).insert(5, colliding);
        state
            .navigation
            .panel_stack
            .push(PanelState::new(Panel::Tournament { event_id: EVENT }));

        let (state, effect) = reduce_panel(state, PanelAction::OpenSelected);

        let Panel::Match {
            event_id,
            match_id,
            api_match_id,
        } = top(&state).panel
        else {
            panic!("expected a match panel");
        };
        assert_eq!((match_id, api_match_id), (5, None));
        // the event's match list is already loaded, nothing to fetch
        assert!(matches!(effect, Effect::None));

        let shown = state.data.find_match(event_id, match_id, api_match_id);
        assert_eq!(shown.map(|m| m.id), Some(5));
        assert_eq!(shown.and_then(|m| m.player1_id), Some(5));

        let (state, _) = reduce_panel(state, PanelAction::OpenPlayer(2));
        assert_eq!(top(&state).panel, Panel::Player { player_id: 17 });
    }
}
