use tracing::debug;

use super::data_loading::ensure_loaded;
use super::navigation::push_panel;
use crate::tui::action::RankingsAction;
use crate::tui::effects::Effect;
use crate::tui::state::{AppState, LoadingKey};
use crate::tui::types::Panel;

pub fn reduce_rankings(state: AppState, action: RankingsAction) -> (AppState, Effect) {
    match action {
        RankingsAction::NextType | RankingsAction::PrevType => {
            let mut new_state = state;
            let current = new_state.ui.rankings.ranking_type;
            let ranking_type = if action == RankingsAction::NextType {
                current.next()
            } else {
                current.prev()
            };
            debug!("RANKINGS: Switching list {} -> {}", current, ranking_type);
            new_state.ui.rankings.ranking_type = ranking_type;
            new_state.ui.rankings.selected_index = 0;
            let effect = ensure_loaded(&mut new_state, LoadingKey::Rankings(ranking_type));
            (new_state, effect)
        }

        RankingsAction::SelectNext => {
            let mut new_state = state;
            let count = new_state
                .data
                .rankings
                .get(&new_state.ui.rankings.ranking_type)
                .map(|t| t.rankings.len())
                .unwrap_or(0);
            let selected = &mut new_state.ui.rankings.selected_index;
            if *selected + 1 < count {
                *selected += 1;
            }
            (new_state, Effect::None)
        }

        RankingsAction::SelectPrev => {
            let mut new_state = state;
            let selected = &mut new_state.ui.rankings.selected_index;
            *selected = selected.saturating_sub(1);
            (new_state, Effect::None)
        }

        RankingsAction::OpenSelected => {
            let player_id = state
                .data
                .rankings
                .get(&state.ui.rankings.ranking_type)
                .and_then(|t| t.rankings.get(state.ui.rankings.selected_index))
                .and_then(|entry| entry.player_id);
            match player_id {
                Some(player_id) => push_panel(state, Panel::Player { player_id }),
                None => (state, Effect::None),
            }
        }
    }
}
