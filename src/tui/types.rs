/// Core type definitions used across the TUI
///
/// Tabs for top-level navigation, panels for drill-down views and the
/// editable settings items.

/// Tab enum for main navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Calendar,
    Rankings,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Calendar, Tab::Rankings, Tab::Settings];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Calendar => "Calendar",
            Tab::Rankings => "Rankings",
            Tab::Settings => "Settings",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Calendar => 0,
            Tab::Rankings => 1,
            Tab::Settings => 2,
        }
    }

    /// Tab for a 1-based number key
    pub fn from_number(n: u32) -> Option<Tab> {
        match n {
            1 => Some(Tab::Calendar),
            2 => Some(Tab::Rankings),
            3 => Some(Tab::Settings),
            _ => None,
        }
    }

    pub fn next(&self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn prev(&self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// Panel types for drill-down views
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Panel {
    Tournament { event_id: i64 },
    /// `match_id` is the backend row id; `api_match_id` is unset for matches
    /// the data source has not assigned an id yet
    Match {
        event_id: i64,
        match_id: i64,
        api_match_id: Option<i64>,
    },
    Player { player_id: i64 },
    HeadToHead { player1_id: i64, player2_id: i64 },
}

impl Panel {
    /// Get the display label for this panel (for breadcrumbs)
    pub fn label(&self) -> String {
        match self {
            Self::Tournament { event_id } => format!("Event {}", event_id),
            Self::Match { match_id, .. } => format!("Match {}", match_id),
            Self::Player { player_id } => format!("Player {}", player_id),
            Self::HeadToHead {
                player1_id,
                player2_id,
            } => format!("H2H {} v {}", player1_id, player2_id),
        }
    }
}

/// Editable items on the settings tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsItem {
    Theme,
    UseUnicode,
    RefreshInterval,
    DefaultTour,
}

impl SettingsItem {
    pub const ALL: [SettingsItem; 4] = [
        SettingsItem::Theme,
        SettingsItem::UseUnicode,
        SettingsItem::RefreshInterval,
        SettingsItem::DefaultTour,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SettingsItem::Theme => "Theme",
            SettingsItem::UseUnicode => "Unicode box drawing",
            SettingsItem::RefreshInterval => "Refresh interval",
            SettingsItem::DefaultTour => "Default tour",
        }
    }
}
