use std::sync::Arc;
use std::time::SystemTime;
use tracing::debug;

use crate::api::{
    Calendar, CalendarTab, Event, HeadToHead, MatchRecord, Player, PrizeBreakdown, RankingTable,
    RankingType,
};
use crate::match_list::{match_positions, RoundInfo};
use crate::tui::action::Action;
use crate::tui::effects::Effect;
use crate::tui::state::{AppState, LoadingKey};
use crate::tui::types::{Panel, Tab};

/// Handle all data loading actions (API responses) and refresh requests
///
/// Returns Ok((new_state, effect)) if the action was handled,
/// or Err(state) to pass ownership back to the caller.
pub fn reduce_data_loading(
    state: AppState,
    action: &Action,
) -> Result<(AppState, Effect), AppState> {
    match action {
        Action::CalendarLoaded(tour, result) => {
            Ok(handle_calendar_loaded(state, *tour, result.clone()))
        }
        Action::EventLoaded(event_id, result) => {
            Ok(handle_event_loaded(state, *event_id, result.clone()))
        }
        Action::EventMatchesLoaded(event_id, result) => Ok(handle_event_matches_loaded(
            state,
            *event_id,
            result.clone(),
        )),
        Action::MatchLoaded(api_match_id, result) => {
            Ok(handle_match_loaded(state, *api_match_id, result.clone()))
        }
        Action::PlayerLoaded(player_id, result) => {
            Ok(handle_player_loaded(state, *player_id, result.clone()))
        }
        Action::RankingsLoaded(ranking_type, result) => {
            Ok(handle_rankings_loaded(state, *ranking_type, result.clone()))
        }
        Action::HeadToHeadLoaded(players, result) => {
            Ok(handle_head_to_head_loaded(state, *players, result.clone()))
        }
        Action::PrizeMoneyLoaded(event_id, result) => {
            Ok(handle_prize_money_loaded(state, *event_id, result.clone()))
        }
        Action::RoundInfoLoaded(event_id, result) => {
            Ok(handle_round_info_loaded(state, *event_id, result.clone()))
        }
        Action::RefreshData => Ok(handle_refresh_data(state)),
        _ => Err(state),
    }
}

/// Typed fetch request for a resource
pub fn fetch_effect(key: LoadingKey, force: bool) -> Effect {
    match key {
        LoadingKey::Calendar(tour) => Effect::FetchCalendar { tour, force },
        LoadingKey::Event(event_id) => Effect::FetchEvent(event_id),
        LoadingKey::EventMatches(event_id) => Effect::FetchEventMatches { event_id, force },
        LoadingKey::Match(api_match_id) => Effect::FetchMatch {
            api_match_id,
            force,
        },
        LoadingKey::Player(player_id) => Effect::FetchPlayer(player_id),
        LoadingKey::Rankings(ranking_type) => Effect::FetchRankings {
            ranking_type,
            force,
        },
        LoadingKey::HeadToHead(p1, p2) => Effect::FetchHeadToHead(p1, p2),
        LoadingKey::PrizeMoney(event_id) => Effect::FetchPrizeMoney(event_id),
        LoadingKey::RoundInfo(event_id) => Effect::FetchRoundInfo(event_id),
    }
}

/// Mark a resource as loading and return its fetch
///
/// A resource already in flight is not requested twice.
pub fn request(state: &mut AppState, key: LoadingKey, force: bool) -> Effect {
    if !state.data.loading.insert(key) {
        debug!("DATA: {:?} already loading", key);
        return Effect::None;
    }
    fetch_effect(key, force)
}

/// Request a resource only when it has never been loaded
pub fn ensure_loaded(state: &mut AppState, key: LoadingKey) -> Effect {
    if state.data.has(&key) {
        Effect::None
    } else {
        request(state, key, false)
    }
}

/// Round details need the event's season and its rounds, so they wait
/// until both are loaded
fn round_info_effect(state: &mut AppState, event_id: i64) -> Effect {
    let ready = state.data.has(&LoadingKey::Event(event_id))
        && state.data.has(&LoadingKey::EventMatches(event_id));
    if ready {
        ensure_loaded(state, LoadingKey::RoundInfo(event_id))
    } else {
        Effect::None
    }
}

/// Round details for an event shown in an open tournament panel
fn open_round_info_effect(state: &mut AppState, event_id: i64) -> Effect {
    let shown = state
        .navigation
        .panel_stack
        .iter()
        .any(|p| p.panel == (Panel::Tournament { event_id }));
    if shown {
        round_info_effect(state, event_id)
    } else {
        Effect::None
    }
}

/// Fetches needed to show a panel
pub fn panel_effects(state: &mut AppState, panel: &Panel) -> Effect {
    let keys = match panel {
        Panel::Tournament { event_id } => vec![
            LoadingKey::Event(*event_id),
            LoadingKey::EventMatches(*event_id),
            LoadingKey::PrizeMoney(*event_id),
        ],
        Panel::Match {
            event_id,
            api_match_id,
            ..
        } => vec![LoadingKey::match_source(*event_id, *api_match_id)],
        Panel::Player { player_id } => vec![LoadingKey::Player(*player_id)],
        Panel::HeadToHead {
            player1_id,
            player2_id,
        } => vec![LoadingKey::HeadToHead(*player1_id, *player2_id)],
    };
    let mut effects: Vec<Effect> = keys
        .into_iter()
        .map(|key| ensure_loaded(state, key))
        .collect();
    if let Panel::Tournament { event_id } = panel {
        effects.push(round_info_effect(state, *event_id));
    }
    Effect::batch(effects)
}

/// Fetches needed to show the content of a tab
pub fn tab_effects(state: &mut AppState, tab: Tab) -> Effect {
    match tab {
        Tab::Calendar => {
            let tour = state.ui.calendar.tour;
            ensure_loaded(state, LoadingKey::Calendar(tour))
        }
        Tab::Rankings => {
            let ranking_type = state.ui.rankings.ranking_type;
            ensure_loaded(state, LoadingKey::Rankings(ranking_type))
        }
        Tab::Settings => Effect::None,
    }
}

/// Clear the loading flag and record the outcome of a fetch
///
/// Returns the loaded value, or None after storing the error.
fn complete<T>(
    state: &mut AppState,
    key: LoadingKey,
    what: &str,
    result: Result<T, String>,
) -> Option<T> {
    state.data.loading.remove(&key);
    match result {
        Ok(value) => {
            let had_error = state.data.errors.remove(&key).is_some();
            if had_error && state.data.errors.is_empty() && state.system.status_is_error {
                state.system.reset_status_message();
            }
            Some(value)
        }
        Err(e) => {
            debug!("DATA: Failed to load {}: {}", what, e);
            let message = format!("Failed to load {}: {}", what, e);
            state
                .system
                .set_status_error_message(format!("{} (press r to retry)", message));
            state.data.errors.insert(key, message);
            None
        }
    }
}

fn handle_calendar_loaded(
    state: AppState,
    tour: CalendarTab,
    result: Result<Calendar, String>,
) -> (AppState, Effect) {
    let mut new_state = state;
    if let Some(calendar) = complete(&mut new_state, LoadingKey::Calendar(tour), "calendar", result)
    {
        debug!(
            "DATA: Loaded calendar {} ({} tournaments)",
            tour,
            calendar.tournaments().count()
        );
        if new_state.ui.calendar.tour == tour {
            let count = calendar.tournaments().count();
            let selected = &mut new_state.ui.calendar.selected_index;
            *selected = (*selected).min(count.saturating_sub(1));
        }
        Arc::make_mut(&mut new_state.data.calendars).insert(tour, calendar);
    }
    (new_state, Effect::None)
}

fn handle_event_loaded(
    state: AppState,
    event_id: i64,
    result: Result<Event, String>,
) -> (AppState, Effect) {
    let mut new_state = state;
    if let Some(event) = complete(&mut new_state, LoadingKey::Event(event_id), "event", result) {
        debug!("DATA: Loaded event {}", event_id);
        Arc::make_mut(&mut new_state.data.events).insert(event_id, event);
    }
    let effect = open_round_info_effect(&mut new_state, event_id);
    (new_state, effect)
}

fn handle_event_matches_loaded(
    state: AppState,
    event_id: i64,
    result: Result<Vec<MatchRecord>, String>,
) -> (AppState, Effect) {
    let mut new_state = state;
    let key = LoadingKey::EventMatches(event_id);
    if let Some(matches) = complete(&mut new_state, key, "matches", result) {
        debug!("DATA: Loaded {} matches for event {}", matches.len(), event_id);
        Arc::make_mut(&mut new_state.data.event_matches).insert(event_id, matches);
        clamp_tournament_selection(&mut new_state, event_id);
    }
    let effect = open_round_info_effect(&mut new_state, event_id);
    (new_state, effect)
}

/// Keep tournament panel selections inside a list that may have shrunk
fn clamp_tournament_selection(state: &mut AppState, event_id: i64) {
    let data = &state.data;
    for panel_state in state.navigation.panel_stack.iter_mut() {
        if panel_state.panel != (Panel::Tournament { event_id }) {
            continue;
        }
        let count = match_positions(&data.match_entries(event_id, panel_state.filter)).len();
        panel_state.selected_index = if count == 0 {
            None
        } else {
            Some(panel_state.selected_index.unwrap_or(0).min(count - 1))
        };
    }
}

fn handle_match_loaded(
    state: AppState,
    api_match_id: i64,
    result: Result<MatchRecord, String>,
) -> (AppState, Effect) {
    let mut new_state = state;
    if let Some(record) = complete(&mut new_state, LoadingKey::Match(api_match_id), "match", result)
    {
        debug!("DATA: Loaded match {}", api_match_id);
        Arc::make_mut(&mut new_state.data.matches).insert(api_match_id, record);
    }
    (new_state, Effect::None)
}

fn handle_player_loaded(
    state: AppState,
    player_id: i64,
    result: Result<Player, String>,
) -> (AppState, Effect) {
    let mut new_state = state;
    if let Some(player) = complete(&mut new_state, LoadingKey::Player(player_id), "player", result)
    {
        debug!("DATA: Loaded player {}", player_id);
        Arc::make_mut(&mut new_state.data.players).insert(player_id, player);
    }
    (new_state, Effect::None)
}

fn handle_rankings_loaded(
    state: AppState,
    ranking_type: RankingType,
    result: Result<RankingTable, String>,
) -> (AppState, Effect) {
    let mut new_state = state;
    let key = LoadingKey::Rankings(ranking_type);
    if let Some(table) = complete(&mut new_state, key, "rankings", result) {
        debug!(
            "DATA: Loaded {} rankings ({} entries)",
            ranking_type,
            table.rankings.len()
        );
        if new_state.ui.rankings.ranking_type == ranking_type {
            let selected = &mut new_state.ui.rankings.selected_index;
            *selected = (*selected).min(table.rankings.len().saturating_sub(1));
        }
        Arc::make_mut(&mut new_state.data.rankings).insert(ranking_type, table);
    }
    (new_state, Effect::None)
}

fn handle_head_to_head_loaded(
    state: AppState,
    players: (i64, i64),
    result: Result<HeadToHead, String>,
) -> (AppState, Effect) {
    let mut new_state = state;
    let key = LoadingKey::HeadToHead(players.0, players.1);
    if let Some(h2h) = complete(&mut new_state, key, "head-to-head", result) {
        debug!("DATA: Loaded head-to-head {} v {}", players.0, players.1);
        Arc::make_mut(&mut new_state.data.head_to_head).insert(players, h2h);
    }
    (new_state, Effect::None)
}

fn handle_prize_money_loaded(
    state: AppState,
    event_id: i64,
    result: Result<PrizeBreakdown, String>,
) -> (AppState, Effect) {
    let mut new_state = state;
    let key = LoadingKey::PrizeMoney(event_id);
    if let Some(prizes) = complete(&mut new_state, key, "prize money", result) {
        Arc::make_mut(&mut new_state.data.prize_money).insert(event_id, prizes);
    }
    (new_state, Effect::None)
}

/// Round details only decorate headers; a failure leaves them blank
/// without an error and is not retried
fn handle_round_info_loaded(
    state: AppState,
    event_id: i64,
    result: Result<RoundInfo, String>,
) -> (AppState, Effect) {
    let mut new_state = state;
    new_state.data.loading.remove(&LoadingKey::RoundInfo(event_id));
    let info = result.unwrap_or_else(|e| {
        debug!("DATA: No round details for event {}: {}", event_id, e);
        RoundInfo::default()
    });
    Arc::make_mut(&mut new_state.data.round_info).insert(event_id, info);
    (new_state, Effect::None)
}

/// Re-fetch live data bypassing the cache, and retry every failed fetch
///
/// Covers the visible calendar, the rankings when that tab is open, and the
/// match data of every open tournament or match panel.
fn handle_refresh_data(state: AppState) -> (AppState, Effect) {
    let mut new_state = state;
    new_state.system.last_refresh = Some(SystemTime::now());

    let mut keys = vec![LoadingKey::Calendar(new_state.ui.calendar.tour)];
    if new_state.navigation.current_tab == Tab::Rankings {
        keys.push(LoadingKey::Rankings(new_state.ui.rankings.ranking_type));
    }
    for panel_state in &new_state.navigation.panel_stack {
        match panel_state.panel {
            Panel::Tournament { event_id } => keys.push(LoadingKey::EventMatches(event_id)),
            Panel::Match {
                event_id,
                api_match_id,
                ..
            } => keys.push(LoadingKey::match_source(event_id, api_match_id)),
            _ => {}
        }
    }
    keys.dedup();
    let mut failed: Vec<LoadingKey> = new_state.data.errors.keys().copied().collect();
    failed.sort_by_key(|k| format!("{:?}", k));
    for key in failed {
        if !keys.contains(&key) {
            keys.push(key);
        }
    }

    debug!("DATA: Refreshing {} resources", keys.len());
    let effects = keys
        .into_iter()
        .map(|key| request(&mut new_state, key, true))
        .collect();
    (new_state, Effect::batch(effects))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{
        create_mock_calendar, create_mock_event, create_mock_event_matches, create_mock_player,
    };
    use crate::tui::state::PanelState;

    fn leaves(effect: Effect) -> Vec<Effect> {
        effect.flatten()
    }

    #[test]
    fn test_request_skips_resources_in_flight() {
        let mut state = AppState::default();

        let first = request(&mut state, LoadingKey::Player(5), false);
        let second = request(&mut state, LoadingKey::Player(5), false);

        assert!(matches!(first, Effect::FetchPlayer(5)));
        assert!(matches!(second, Effect::None));
        assert!(state.data.is_loading(&LoadingKey::Player(5)));
    }

    #[test]
    fn test_ensure_loaded_skips_loaded_resources() {
        let mut state = AppState::default();
        Arc::make_mut(&mut state.data.players).insert(5, create_mock_player(5));

        assert!(matches!(
            ensure_loaded(&mut state, LoadingKey::Player(5)),
            Effect::None
        ));
        assert!(matches!(
            ensure_loaded(&mut state, LoadingKey::Player(17)),
            Effect::FetchPlayer(17)
        ));
    }

    #[test]
    fn test_tournament_panel_requests_event_data() {
        let mut state = AppState::default();

        let effects = leaves(panel_effects(&mut state, &Panel::Tournament { event_id: 42 }));

        assert_eq!(effects.len(), 3);
        assert!(matches!(effects[0], Effect::FetchEvent(42)));
        assert!(matches!(
            effects[1],
            Effect::FetchEventMatches {
                event_id: 42,
                force: false
            }
        ));
        assert!(matches!(effects[2], Effect::FetchPrizeMoney(42)));
    }

    #[test]
    fn test_match_panel_without_api_id_uses_event_matches() {
        let mut state = AppState::default();
        let panel = Panel::Match {
            event_id: 42,
            match_id: 7,
            api_match_id: None,
        };

        let effects = leaves(panel_effects(&mut state, &panel));

        assert_eq!(effects.len(), 1);
        assert!(matches!(
            effects[0],
            Effect::FetchEventMatches {
                event_id: 42,
                force: false
            }
        ));
    }

    #[test]
    fn test_calendar_loaded_stores_data() {
        let mut state = AppState::default();
        state.data.loading.insert(LoadingKey::Calendar(CalendarTab::Main));

        let calendar = create_mock_calendar(CalendarTab::Main, None);
        let (new_state, effect) = reduce_data_loading(
            state,
            &Action::CalendarLoaded(CalendarTab::Main, Ok(calendar)),
        )
        .unwrap();

        assert!(matches!(effect, Effect::None));
        assert!(new_state.data.calendars.contains_key(&CalendarTab::Main));
        assert!(new_state.data.loading.is_empty());
    }

    #[test]
    fn test_load_error_is_recorded_with_retry_hint() {
        let mut state = AppState::default();
        state.data.loading.insert(LoadingKey::Player(5));

        let (new_state, _) = reduce_data_loading(
            state,
            &Action::PlayerLoaded(5, Err("HTTP 503".to_string())),
        )
        .unwrap();

        assert_eq!(
            new_state.data.error(&LoadingKey::Player(5)),
            Some("Failed to load player: HTTP 503")
        );
        assert!(new_state.system.status_is_error);
        assert!(new_state
            .system
            .status_message
            .as_deref()
            .unwrap_or_default()
            .contains("press r to retry"));
        assert!(!new_state.data.is_loading(&LoadingKey::Player(5)));
    }

    #[test]
    fn test_success_clears_previous_error() {
        let mut state = AppState::default();
        state
            .data
            .errors
            .insert(LoadingKey::Player(5), "Failed to load player: x".to_string());
        state.system.set_status_error_message("Failed".to_string());

        let (new_state, _) =
            reduce_data_loading(state, &Action::PlayerLoaded(5, Ok(create_mock_player(5))))
                .unwrap();

        assert!(new_state.data.errors.is_empty());
        assert!(!new_state.system.status_is_error);
        assert!(new_state.data.players.contains_key(&5));
    }

    #[test]
    fn test_refresh_retries_failed_fetches() {
        let mut state = AppState::default();
        state
            .data
            .errors
            .insert(LoadingKey::Player(17), "Failed to load player: x".to_string());

        let (new_state, effect) = reduce_data_loading(state, &Action::RefreshData).unwrap();

        let effects = leaves(effect);
        assert!(effects.iter().any(|e| matches!(
            e,
            Effect::FetchCalendar {
                tour: CalendarTab::Main,
                force: true
            }
        )));
        assert!(effects.iter().any(|e| matches!(e, Effect::FetchPlayer(17))));
        assert!(new_state.system.last_refresh.is_some());
        assert!(new_state.data.is_loading(&LoadingKey::Player(17)));
    }

    #[test]
    fn test_refresh_bypasses_cache_for_open_tournament() {
        let mut state = AppState::default();
        state
            .navigation
            .panel_stack
            .push(PanelState::new(Panel::Tournament { event_id: 2101 }));

        let (_, effect) = reduce_data_loading(state, &Action::RefreshData).unwrap();

        assert!(leaves(effect).iter().any(|e| matches!(
            e,
            Effect::FetchEventMatches {
                event_id: 2101,
                force: true
            }
        )));
    }

    #[test]
    fn test_matches_loaded_clamps_panel_selection() {
        let mut state = AppState::default();
        let mut panel = PanelState::new(Panel::Tournament { event_id: 7 });
        panel.selected_index = Some(50);
        state.navigation.panel_stack.push(panel);

        let matches = create_mock_event_matches(7);
        let count = matches.len();
        let (new_state, _) =
            reduce_data_loading(state, &Action::EventMatchesLoaded(7, Ok(matches))).unwrap();

        assert_eq!(
            new_state.navigation.panel_stack[0].selected_index,
            Some(count - 1)
        );
    }

    #[test]
    fn test_unrelated_actions_pass_through() {
        let state = AppState::default();
        assert!(reduce_data_loading(state, &Action::Quit).is_err());
    }

    #[test]
    fn test_round_info_requested_once_event_and_matches_loaded() {
        let mut state = AppState::default();
        state
            .navigation
            .panel_stack
            .push(PanelState::new(Panel::Tournament { event_id: 42 }));

        let (state, effect) =
            reduce_data_loading(state, &Action::EventLoaded(42, Ok(create_mock_event(42)))).unwrap();
        assert!(matches!(effect, Effect::None));

        let matches = create_mock_event_matches(42);
        let (state, effect) =
            reduce_data_loading(state, &Action::EventMatchesLoaded(42, Ok(matches.clone())))
                .unwrap();
        assert!(matches!(effect, Effect::FetchRoundInfo(42)));
        assert!(state.data.is_loading(&LoadingKey::RoundInfo(42)));

        // A live refresh of the matches does not ask again
        let (_, effect) =
            reduce_data_loading(state, &Action::EventMatchesLoaded(42, Ok(matches))).unwrap();
        assert!(matches!(effect, Effect::None));
    }

    #[test]
    fn test_round_info_not_requested_without_tournament_panel() {
        let mut state = AppState::default();
        Arc::make_mut(&mut state.data.events).insert(42, create_mock_event(42));

        let (_, effect) = reduce_data_loading(
            state,
            &Action::EventMatchesLoaded(42, Ok(create_mock_event_matches(42))),
        )
        .unwrap();

        assert!(matches!(effect, Effect::None));
    }

    #[test]
    fn test_reopened_tournament_requests_round_info() {
        let mut state = AppState::default();
        Arc::make_mut(&mut state.data.events).insert(42, create_mock_event(42));
        Arc::make_mut(&mut state.data.event_matches).insert(42, create_mock_event_matches(42));

        let effects = leaves(panel_effects(&mut state, &Panel::Tournament { event_id: 42 }));

        assert_eq!(effects.len(), 2);
        assert!(matches!(effects[0], Effect::FetchPrizeMoney(42)));
        assert!(matches!(effects[1], Effect::FetchRoundInfo(42)));
    }

    #[test]
    fn test_round_info_failure_is_not_reported() {
        let mut state = AppState::default();
        state.data.loading.insert(LoadingKey::RoundInfo(42));

        let (new_state, _) = reduce_data_loading(
            state,
            &Action::RoundInfoLoaded(42, Err("Not found: round".to_string())),
        )
        .unwrap();

        assert!(new_state.data.errors.is_empty());
        assert!(!new_state.system.status_is_error);
        assert!(!new_state.data.is_loading(&LoadingKey::RoundInfo(42)));
        assert!(new_state.data.has(&LoadingKey::RoundInfo(42)));
        assert_eq!(new_state.data.round_info[&42], RoundInfo::default());
    }
}
