use std::fmt;
use std::str::FromStr;

use phf::phf_map;

/// Tour filter for the calendar endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CalendarTab {
    #[default]
    Main,
    Others,
    All,
}

impl CalendarTab {
    pub const ALL: [CalendarTab; 3] = [CalendarTab::Main, CalendarTab::Others, CalendarTab::All];

    pub fn as_str(&self) -> &'static str {
        match self {
            CalendarTab::Main => "main",
            CalendarTab::Others => "others",
            CalendarTab::All => "all",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CalendarTab::Main => "Main Tour",
            CalendarTab::Others => "Other Tours",
            CalendarTab::All => "All",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            CalendarTab::Main => CalendarTab::Others,
            CalendarTab::Others => CalendarTab::All,
            CalendarTab::All => CalendarTab::Main,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            CalendarTab::Main => CalendarTab::All,
            CalendarTab::Others => CalendarTab::Main,
            CalendarTab::All => CalendarTab::Others,
        }
    }
}

impl fmt::Display for CalendarTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalendarTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "main" => Ok(CalendarTab::Main),
            "others" | "other" => Ok(CalendarTab::Others),
            "all" => Ok(CalendarTab::All),
            _ => Err(format!("Unknown tour '{}'. Use main, others or all", s)),
        }
    }
}

/// Ranking list types served by the rankings endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RankingType {
    #[default]
    MoneyRankings,
    MoneySeedings,
    OneYearMoneyRankings,
    QTRankings,
    WomensRankings,
}

/// Display name and description for each ranking type
pub struct RankingInfo {
    pub name: &'static str,
    pub description: &'static str,
}

static RANKING_INFO: phf::Map<&'static str, RankingInfo> = phf_map! {
    "MoneyRankings" => RankingInfo {
        name: "Prize Money Rankings",
        description: "Official world rankings based on prize money earned",
    },
    "MoneySeedings" => RankingInfo {
        name: "Money Seedings",
        description: "Tournament seedings based on prize money",
    },
    "OneYearMoneyRankings" => RankingInfo {
        name: "One Year Money Rankings",
        description: "Prize money rankings for the past year",
    },
    "QTRankings" => RankingInfo {
        name: "Q Tour Rankings",
        description: "Qualifying tour official rankings",
    },
    "WomensRankings" => RankingInfo {
        name: "Women's World Rankings",
        description: "Official women's world rankings",
    },
};

impl RankingType {
    pub const ALL: [RankingType; 5] = [
        RankingType::MoneyRankings,
        RankingType::MoneySeedings,
        RankingType::OneYearMoneyRankings,
        RankingType::QTRankings,
        RankingType::WomensRankings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RankingType::MoneyRankings => "MoneyRankings",
            RankingType::MoneySeedings => "MoneySeedings",
            RankingType::OneYearMoneyRankings => "OneYearMoneyRankings",
            RankingType::QTRankings => "QTRankings",
            RankingType::WomensRankings => "WomensRankings",
        }
    }

    pub fn info(&self) -> &'static RankingInfo {
        // every variant has an entry in the table
        &RANKING_INFO[self.as_str()]
    }

    /// Short label for sub-tabs
    pub fn short_label(&self) -> &'static str {
        match self {
            RankingType::MoneyRankings => "World",
            RankingType::MoneySeedings => "Seedings",
            RankingType::OneYearMoneyRankings => "One Year",
            RankingType::QTRankings => "Q Tour",
            RankingType::WomensRankings => "Women",
        }
    }

    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|t| t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        let idx = Self::ALL.iter().position(|t| t == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for RankingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RankingType::ALL
            .iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| {
                let names: Vec<&str> = RankingType::ALL.iter().map(|t| t.as_str()).collect();
                format!("Unknown ranking type '{}'. Available: {}", s, names.join(", "))
            })
    }
}
