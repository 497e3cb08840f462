use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use crate::api::{
    Calendar, CalendarTab, Event, HeadToHead, MatchRecord, Player, PrizeBreakdown, RankingTable,
    RankingType,
};
use crate::config::Config;
use crate::match_list::{categorize_matches, MatchFilter, MatchListEntry, RoundInfo};

use super::types::{Panel, Tab};

/// Root application state - single source of truth
///
/// All state changes happen through the reducer. Widgets receive slices of
/// this state when the view is drawn.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Navigation state (which tab, panel stack)
    pub navigation: NavigationState,

    /// Application data (from API)
    pub data: DataState,

    /// UI state per tab
    pub ui: UiState,

    /// System state
    pub system: SystemState,
}

impl AppState {
    /// Initial state for a session with the given configuration
    pub fn new(config: Config) -> Self {
        let mut state = AppState::default();
        state.ui.calendar.tour = config.default_tab();
        state.system.config = config;
        state.system.reset_status_message();
        state
    }

    /// Panel on top of the drill-down stack, if any
    pub fn current_panel(&self) -> Option<&PanelState> {
        self.navigation.panel_stack.last()
    }

    pub fn season(&self) -> Option<i32> {
        self.system.config.season
    }
}

#[derive(Debug, Clone, Default)]
pub struct NavigationState {
    pub current_tab: Tab,
    pub panel_stack: Vec<PanelState>,
    /// Whether focus is on content (true) or tab bar (false)
    pub content_focused: bool,
}

#[derive(Debug, Clone)]
pub struct PanelState {
    pub panel: Panel,
    /// Selected match within the panel, counted over selectable rows only
    pub selected_index: Option<usize>,
    /// Category filter of the tournament match list
    pub filter: MatchFilter,
}

impl PanelState {
    pub fn new(panel: Panel) -> Self {
        let selected_index = match panel {
            Panel::Tournament { .. } => Some(0),
            _ => None,
        };
        Self {
            panel,
            selected_index,
            filter: MatchFilter::All,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DataState {
    // API data - wrapped in Arc to avoid deep clones on every reducer call
    pub calendars: Arc<HashMap<CalendarTab, Calendar>>,
    pub events: Arc<HashMap<i64, Event>>,
    pub event_matches: Arc<HashMap<i64, Vec<MatchRecord>>>,
    pub matches: Arc<HashMap<i64, MatchRecord>>,
    pub players: Arc<HashMap<i64, Player>>,
    pub rankings: Arc<HashMap<RankingType, RankingTable>>,
    pub head_to_head: Arc<HashMap<(i64, i64), HeadToHead>>,
    pub prize_money: Arc<HashMap<i64, PrizeBreakdown>>,
    pub round_info: Arc<HashMap<i64, RoundInfo>>,

    // Loading states
    pub loading: HashSet<LoadingKey>,

    // Errors, keyed by the resource that failed so it can be fetched again
    pub errors: HashMap<LoadingKey, String>,
}

impl DataState {
    pub fn is_loading(&self, key: &LoadingKey) -> bool {
        self.loading.contains(key)
    }

    pub fn error(&self, key: &LoadingKey) -> Option<&str> {
        self.errors.get(key).map(String::as_str)
    }

    /// Whether data for `key` has been loaded at least once
    pub fn has(&self, key: &LoadingKey) -> bool {
        match key {
            LoadingKey::Calendar(tour) => self.calendars.contains_key(tour),
            LoadingKey::Event(id) => self.events.contains_key(id),
            LoadingKey::EventMatches(id) => self.event_matches.contains_key(id),
            LoadingKey::Match(id) => self.matches.contains_key(id),
            LoadingKey::Player(id) => self.players.contains_key(id),
            LoadingKey::Rankings(ranking_type) => self.rankings.contains_key(ranking_type),
            LoadingKey::HeadToHead(p1, p2) => self.head_to_head.contains_key(&(*p1, *p2)),
            LoadingKey::PrizeMoney(id) => self.prize_money.contains_key(id),
            LoadingKey::RoundInfo(id) => self.round_info.contains_key(id),
        }
    }

    /// Categorized match list of an event narrowed by `filter`
    pub fn match_entries(&self, event_id: i64, filter: MatchFilter) -> Vec<MatchListEntry> {
        self.event_matches
            .get(&event_id)
            .map(|matches| filter.apply(&categorize_matches(matches)))
            .unwrap_or_default()
    }

    /// Latest known record of a match, preferring the single-match fetch
    ///
    /// The event's match list is searched by row id only; API ids and row ids
    /// come from different number spaces.
    pub fn find_match(
        &self,
        event_id: i64,
        match_id: i64,
        api_match_id: Option<i64>,
    ) -> Option<&MatchRecord> {
        api_match_id
            .and_then(|api_id| self.matches.get(&api_id))
            .or_else(|| {
                self.event_matches
                    .get(&event_id)
                    .and_then(|matches| matches.iter().find(|m| m.id == match_id))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadingKey {
    Calendar(CalendarTab),
    Event(i64),
    EventMatches(i64),
    Match(i64),
    Player(i64),
    Rankings(RankingType),
    HeadToHead(i64, i64),
    PrizeMoney(i64),
    /// Best-of formats and prizes of an event's rounds
    RoundInfo(i64),
}

impl LoadingKey {
    /// Resource a match panel is shown from: the single-match endpoint when
    /// the match has an API id, otherwise the event's match list
    pub fn match_source(event_id: i64, api_match_id: Option<i64>) -> Self {
        match api_match_id {
            Some(api_id) => LoadingKey::Match(api_id),
            None => LoadingKey::EventMatches(event_id),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub calendar: CalendarUiState,
    pub rankings: RankingsUiState,
    pub settings: SettingsUiState,
}

#[derive(Debug, Clone, Default)]
pub struct CalendarUiState {
    pub tour: CalendarTab,
    /// Index over active, upcoming and recent tournaments in display order
    pub selected_index: usize,
}

#[derive(Debug, Clone, Default)]
pub struct RankingsUiState {
    pub ranking_type: RankingType,
    pub selected_index: usize,
}

#[derive(Debug, Clone, Default)]
pub struct SettingsUiState {
    pub selected_index: usize,
}

/// Default help message shown in the status bar
pub const DEFAULT_STATUS_MESSAGE: &str =
    "Keys: ←→ navigate | ↓ enter | ↑/ESC back | r refresh | q quit | 1-3 jump to tab";

#[derive(Debug, Clone, Default)]
pub struct SystemState {
    pub last_refresh: Option<SystemTime>,
    pub config: Config,
    pub status_message: Option<String>,
    pub status_is_error: bool,
}

impl SystemState {
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_is_error = false;
    }

    pub fn set_status_error_message(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_is_error = true;
    }

    pub fn reset_status_message(&mut self) {
        self.status_message = Some(DEFAULT_STATUS_MESSAGE.to_string());
        self.status_is_error = false;
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.config.refresh_interval.max(1)))
    }

    /// Time left until the next periodic refresh, zero when one is due
    pub fn next_refresh_in(&self, now: SystemTime) -> Option<Duration> {
        let last = self.last_refresh?;
        let elapsed = now.duration_since(last).unwrap_or_default();
        Some(self.refresh_interval().saturating_sub(elapsed))
    }

    pub fn refresh_due(&self, now: SystemTime) -> bool {
        matches!(self.next_refresh_in(now), Some(d) if d.is_zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_status_message() {
        let mut state = SystemState::default();

        state.set_status_message("Test message".to_string());

        assert_eq!(state.status_message, Some("Test message".to_string()));
        assert!(!state.status_is_error);
    }

    #[test]
    fn test_set_status_error_message_then_normal_clears_flag() {
        let mut state = SystemState::default();

        state.set_status_error_message("Error".to_string());
        assert!(state.status_is_error);

        state.set_status_message("Normal message".to_string());
        assert!(!state.status_is_error);
    }

    #[test]
    fn test_reset_status_message() {
        let mut state = SystemState::default();
        state.set_status_error_message("boom".to_string());

        state.reset_status_message();

        assert_eq!(state.status_message.as_deref(), Some(DEFAULT_STATUS_MESSAGE));
        assert!(!state.status_is_error);
    }

    #[test]
    fn test_next_refresh_countdown() {
        let mut state = SystemState::default();
        state.config.refresh_interval = 60;
        let start = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000);

        assert_eq!(state.next_refresh_in(start), None);
        assert!(!state.refresh_due(start));

        state.last_refresh = Some(start);
        assert_eq!(
            state.next_refresh_in(start + Duration::from_secs(15)),
            Some(Duration::from_secs(45))
        );
        assert!(!state.refresh_due(start + Duration::from_secs(59)));
        assert!(state.refresh_due(start + Duration::from_secs(60)));
        assert!(state.refresh_due(start + Duration::from_secs(600)));
    }

    #[test]
    fn test_new_state_uses_default_tour() {
        let config = Config {
            default_tour: "others".to_string(),
            ..Config::default()
        };

        let state = AppState::new(config);

        assert_eq!(state.ui.calendar.tour, CalendarTab::Others);
        assert_eq!(state.navigation.current_tab, Tab::Calendar);
        assert!(state.current_panel().is_none());
    }

    #[test]
    fn test_find_match_prefers_single_match_data() {
        let mut data = DataState::default();
        let matches = crate::fixtures::create_mock_event_matches(7);
        let (row_id, api_id) = (matches[0].id, matches[0].api_match_id);
        Arc::make_mut(&mut data.event_matches).insert(7, matches.clone());

        assert_eq!(data.find_match(7, row_id, api_id).map(|m| m.id), Some(row_id));
        assert!(data.find_match(8, row_id, api_id).is_none());

        let mut updated = matches[0].clone();
        updated.score1 = Some(4);
        Arc::make_mut(&mut data.matches).insert(api_id.expect("fixture api id"), updated);
        assert_eq!(data.find_match(8, row_id, api_id).and_then(|m| m.score1), Some(4));
    }

    #[test]
    fn test_find_match_without_api_id_ignores_colliding_api_ids() {
        let mut data = DataState::default();
        let mut unassigned = crate::fixtures::create_mock_match(5, Some(1), 1, (5, 17), 1, None);
        unassigned.api_match_id = None;
        let mut other = crate::fixtures::create_mock_match(9, Some(1), 2, (12, 30), 1, None);
        other.api_match_id = Some(5);
        Arc::make_mut(&mut data.event_matches).insert(7, vec![other.clone(), unassigned]);
        Arc::make_mut(&mut data.matches).insert(5, other);

        assert_eq!(data.find_match(7, 5, None).map(|m| m.id), Some(5));
        assert_eq!(data.find_match(7, 9, Some(5)).map(|m| m.id), Some(9));
    }

    #[test]
    fn test_match_source_key() {
        assert_eq!(LoadingKey::match_source(7, Some(88)), LoadingKey::Match(88));
        assert_eq!(LoadingKey::match_source(7, None), LoadingKey::EventMatches(7));
    }

    #[test]
    fn test_match_entries_applies_filter() {
        let mut data = DataState::default();
        Arc::make_mut(&mut data.event_matches)
            .insert(7, crate::fixtures::create_mock_event_matches(7));

        let all = data.match_entries(7, MatchFilter::All);
        let live = data.match_entries(7, MatchFilter::Only(crate::match_list::MatchCategory::Live));

        assert!(all.len() > live.len());
        assert!(live.iter().all(|e| e.category() == crate::match_list::MatchCategory::Live));
        assert!(data.match_entries(99, MatchFilter::All).is_empty());
        assert!(data.has(&LoadingKey::EventMatches(7)));
        assert!(!data.has(&LoadingKey::EventMatches(99)));
    }

    #[test]
    fn test_tournament_panel_starts_with_selection() {
        let panel = PanelState::new(Panel::Tournament { event_id: 1 });
        assert_eq!(panel.selected_index, Some(0));

        let panel = PanelState::new(Panel::Player { player_id: 5 });
        assert_eq!(panel.selected_index, None);
    }
}
