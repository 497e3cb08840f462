use tracing::{debug, trace};

use super::data_loading::{panel_effects, tab_effects};
use crate::tui::action::Action;
use crate::tui::effects::Effect;
use crate::tui::state::{AppState, PanelState};
use crate::tui::types::{Panel, Tab};

/// Handle all navigation-related actions
pub fn reduce_navigation(state: AppState, action: &Action) -> Result<(AppState, Effect), AppState> {
    match action {
        Action::NavigateTab(tab) => Ok(navigate_to_tab(state, *tab)),
        Action::NavigateTabLeft => {
            let tab = state.navigation.current_tab.prev();
            Ok(navigate_to_tab(state, tab))
        }
        Action::NavigateTabRight => {
            let tab = state.navigation.current_tab.next();
            Ok(navigate_to_tab(state, tab))
        }
        Action::EnterContentFocus => Ok(enter_content_focus(state)),
        Action::ExitContentFocus => Ok(exit_content_focus(state)),
        Action::PushPanel(panel) => Ok(push_panel(state, panel.clone())),
        Action::PopPanel => Ok(pop_panel(state)),
        Action::NavigateUp => Ok(navigate_up(state)),
        _ => Err(state),
    }
}

fn navigate_to_tab(state: AppState, tab: Tab) -> (AppState, Effect) {
    trace!("Navigating to tab: {:?}", tab);
    let mut new_state = state;
    new_state.navigation.current_tab = tab;
    new_state.navigation.panel_stack.clear();
    new_state.navigation.content_focused = false; // Return focus to tab bar
    new_state.system.reset_status_message();
    let effect = tab_effects(&mut new_state, tab);
    (new_state, effect)
}

fn content_help(tab: Tab) -> &'static str {
    match tab {
        Tab::Calendar => "←→: tour  ↑↓: select  Enter: open tournament  Esc: back",
        Tab::Rankings => "←→: ranking list  ↑↓: select  Enter: open player  Esc: back",
        Tab::Settings => "↑↓: select  ←→/Enter: change value  Esc: back",
    }
}

fn panel_help(panel: &Panel) -> &'static str {
    match panel {
        Panel::Tournament { .. } => "←→: filter  ↑↓: select  Enter: open match  r: refresh  Esc: back",
        Panel::Match { .. } => "1/2: player  h: head-to-head  r: refresh  Esc: back",
        Panel::Player { .. } | Panel::HeadToHead { .. } => "Esc: back",
    }
}

fn enter_content_focus(state: AppState) -> (AppState, Effect) {
    debug!("FOCUS: Entering content focus (Down key from tab bar)");
    let mut new_state = state;
    new_state.navigation.content_focused = true;
    let help = content_help(new_state.navigation.current_tab);
    new_state.system.set_status_message(help.to_string());
    (new_state, Effect::None)
}

fn exit_content_focus(state: AppState) -> (AppState, Effect) {
    debug!("FOCUS: Exiting content focus (Up key to tab bar)");
    let mut new_state = state;
    new_state.navigation.content_focused = false;
    new_state.system.reset_status_message();
    (new_state, Effect::None)
}

/// Open a drill-down panel and request the data it shows
pub fn push_panel(state: AppState, panel: Panel) -> (AppState, Effect) {
    debug!("PANEL: Pushing {}", panel.label());
    let mut new_state = state;
    new_state.navigation.content_focused = true;
    new_state.system.set_status_message(panel_help(&panel).to_string());
    let effect = panel_effects(&mut new_state, &panel);
    new_state.navigation.panel_stack.push(PanelState::new(panel));
    (new_state, effect)
}

fn pop_panel(state: AppState) -> (AppState, Effect) {
    let mut new_state = state;
    if let Some(popped) = new_state.navigation.panel_stack.pop() {
        debug!("PANEL: Popped {}", popped.panel.label());
    }
    let help = match new_state.current_panel() {
        Some(panel_state) => panel_help(&panel_state.panel),
        None => content_help(new_state.navigation.current_tab),
    };
    new_state.system.set_status_message(help.to_string());
    (new_state, Effect::None)
}

/// Unified "navigate up" action (ESC key)
///
/// Hierarchical fallthrough:
/// 1. If panel stack not empty → pop panel
/// 2. If content_focused → set content_focused = false
/// 3. Otherwise do nothing (already at top level)
fn navigate_up(state: AppState) -> (AppState, Effect) {
    if !state.navigation.panel_stack.is_empty() {
        debug!("NAVIGATE_UP: Popping panel from stack");
        return pop_panel(state);
    }

    if state.navigation.content_focused {
        debug!("NAVIGATE_UP: Exiting content focus");
        return exit_content_focus(state);
    }

    (state, Effect::None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{CalendarTab, RankingType};
    use crate::tui::state::{LoadingKey, DEFAULT_STATUS_MESSAGE};

    #[test]
    fn test_navigate_to_tab_clears_panels_and_focus() {
        let mut state = AppState::default();
        state.navigation.content_focused = true;
        state
            .navigation
            .panel_stack
            .push(PanelState::new(Panel::Player { player_id: 5 }));

        let (new_state, _) = reduce_navigation(state, &Action::NavigateTab(Tab::Settings)).unwrap();

        assert_eq!(new_state.navigation.current_tab, Tab::Settings);
        assert!(new_state.navigation.panel_stack.is_empty());
        assert!(!new_state.navigation.content_focused);
    }

    #[test]
    fn test_navigate_to_rankings_requests_table_once() {
        let state = AppState::default();

        let (state, effect) = reduce_navigation(state, &Action::NavigateTabRight).unwrap();
        assert_eq!(state.navigation.current_tab, Tab::Rankings);
        assert!(matches!(
            effect,
            Effect::FetchRankings {
                ranking_type: RankingType::MoneyRankings,
                force: false
            }
        ));

        // still in flight, so switching back and forth does not re-request
        let (state, _) = reduce_navigation(state, &Action::NavigateTabLeft).unwrap();
        let (_, effect) = reduce_navigation(state, &Action::NavigateTabRight).unwrap();
        assert!(matches!(effect, Effect::None));
    }

    #[test]
    fn test_navigate_left_wraps_to_settings() {
        let (state, effect) = reduce_navigation(AppState::default(), &Action::NavigateTabLeft).unwrap();
        assert_eq!(state.navigation.current_tab, Tab::Settings);
        assert!(matches!(effect, Effect::None));
    }

    #[test]
    fn test_navigate_to_calendar_requests_current_tour() {
        let mut state = AppState::default();
        state.navigation.current_tab = Tab::Settings;
        state.ui.calendar.tour = CalendarTab::All;

        let (state, effect) = reduce_navigation(state, &Action::NavigateTab(Tab::Calendar)).unwrap();

        assert!(matches!(
            effect,
            Effect::FetchCalendar {
                tour: CalendarTab::All,
                force: false
            }
        ));
        assert!(state.data.is_loading(&LoadingKey::Calendar(CalendarTab::All)));
    }

    #[test]
    fn test_push_panel_focuses_content_and_fetches() {
        let state = AppState::default();

        let (new_state, effect) =
            reduce_navigation(state, &Action::PushPanel(Panel::Player { player_id: 12 })).unwrap();

        assert_eq!(new_state.navigation.panel_stack.len(), 1);
        assert!(new_state.navigation.content_focused);
        assert!(matches!(effect, Effect::FetchPlayer(12)));
    }

    #[test]
    fn test_navigate_up_pops_panel_before_exiting_focus() {
        let mut state = AppState::default();
        state.navigation.content_focused = true;
        state
            .navigation
            .panel_stack
            .push(PanelState::new(Panel::Tournament { event_id: 1 }));
        state
            .navigation
            .panel_stack
            .push(PanelState::new(Panel::Player { player_id: 5 }));

        let (state, _) = reduce_navigation(state, &Action::NavigateUp).unwrap();
        assert_eq!(state.navigation.panel_stack.len(), 1);
        assert!(state.navigation.content_focused);

        let (state, _) = reduce_navigation(state, &Action::NavigateUp).unwrap();
        assert!(state.navigation.panel_stack.is_empty());
        assert!(state.navigation.content_focused);

        let (state, _) = reduce_navigation(state, &Action::NavigateUp).unwrap();
        assert!(!state.navigation.content_focused);
        assert_eq!(
            state.system.status_message.as_deref(),
            Some(DEFAULT_STATUS_MESSAGE)
        );

        // already at the top: nothing changes
        let (state, effect) = reduce_navigation(state, &Action::NavigateUp).unwrap();
        assert!(!state.navigation.content_focused);
        assert!(matches!(effect, Effect::None));
    }

    #[test]
    fn test_enter_content_focus_sets_help() {
        let (state, _) =
            reduce_navigation(AppState::default(), &Action::EnterContentFocus).unwrap();
        assert!(state.navigation.content_focused);
        assert!(state
            .system
            .status_message
            .as_deref()
            .unwrap_or_default()
            .contains("Enter: open tournament"));
    }
}
