use crate::api::{
    Calendar, CalendarTab, Event, HeadToHead, MatchRecord, Player, PrizeBreakdown, RankingTable,
    RankingType,
};
use crate::match_list::RoundInfo;

use super::types::{Panel, Tab};

/// Global actions - like Redux actions
///
/// All state changes in the application happen through actions.
/// Actions are dispatched from:
/// - User input (key events)
/// - Effects (async data loading, config saves)
#[derive(Debug, Clone)]
pub enum Action {
    // Navigation actions
    NavigateTab(Tab),
    NavigateTabLeft,
    NavigateTabRight,
    EnterContentFocus, // Down key: move focus from tab bar to content
    ExitContentFocus,  // Up key: move focus from content back to tab bar
    PushPanel(Panel),
    PopPanel,

    /// Unified "navigate up" action (ESC key)
    ///
    /// Pops the top panel if there is one, otherwise returns focus to the
    /// tab bar.
    NavigateUp,

    // Data actions
    /// Re-fetch visible live data and retry everything that failed
    RefreshData,

    // Data loaded (from effects)
    CalendarLoaded(CalendarTab, Result<Calendar, String>),
    EventLoaded(i64, Result<Event, String>),
    EventMatchesLoaded(i64, Result<Vec<MatchRecord>, String>),
    MatchLoaded(i64, Result<MatchRecord, String>),
    PlayerLoaded(i64, Result<Player, String>),
    RankingsLoaded(RankingType, Result<RankingTable, String>),
    HeadToHeadLoaded((i64, i64), Result<HeadToHead, String>),
    PrizeMoneyLoaded(i64, Result<PrizeBreakdown, String>),
    RoundInfoLoaded(i64, Result<RoundInfo, String>),

    // Tab and panel specific actions
    CalendarAction(CalendarAction),
    RankingsAction(RankingsAction),
    PanelAction(PanelAction),
    SettingsAction(SettingsAction),

    // System actions
    Quit,
    Error(String),
    SetStatusMessage { message: String, is_error: bool },
}

/// Actions for the calendar tab content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarAction {
    NextTour,
    PrevTour,
    SelectNext,
    SelectPrev,
    /// Open the selected tournament
    OpenSelected,
}

/// Actions for the rankings tab content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingsAction {
    NextType,
    PrevType,
    SelectNext,
    SelectPrev,
    /// Open the selected player
    OpenSelected,
}

/// Actions for the panel on top of the stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    SelectNext,
    SelectPrev,
    NextFilter,
    PrevFilter,
    /// Open the selected match of a tournament panel
    OpenSelected,
    /// Open player 1 or 2 of a match panel
    OpenPlayer(u8),
    /// Open the head-to-head of a match panel's players
    OpenHeadToHead,
}

/// Tab-specific actions for Settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction {
    SelectNext,
    SelectPrev,
    /// Change the selected setting; `forward` picks the cycling direction
    ChangeSelected { forward: bool },
}

impl Action {
    /// Returns true if this action should trigger a re-render
    pub fn should_render(&self) -> bool {
        !matches!(self, Self::Error(_))
    }
}
