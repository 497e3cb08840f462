//! Tournament match list shaping
//!
//! Turns the flat list of matches returned for an event into the ordered
//! sequence rendered by both the `matches` command and the tournament panel:
//! matches are bucketed by status, sorted within each bucket, and interleaved
//! with synthetic status and round header rows.

use std::cmp::{Ordering, Reverse};
use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};

use crate::api::{MatchRecord, RoundFormat, RoundPrizes};

/// Status bucket of a match, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MatchCategory {
    Live,
    OnBreak,
    Upcoming,
    Finished,
}

impl MatchCategory {
    pub const ALL: [MatchCategory; 4] = [
        MatchCategory::Live,
        MatchCategory::OnBreak,
        MatchCategory::Upcoming,
        MatchCategory::Finished,
    ];

    /// Map an API status code to a category
    ///
    /// 0 = upcoming, 1 = live, 2 = on break, 3 = finished. Unknown or missing
    /// codes are treated as upcoming.
    pub fn from_status_code(code: Option<i32>) -> Self {
        match code {
            Some(1) => MatchCategory::Live,
            Some(2) => MatchCategory::OnBreak,
            Some(3) => MatchCategory::Finished,
            _ => MatchCategory::Upcoming,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchCategory::Live => "Live",
            MatchCategory::OnBreak => "On Break",
            MatchCategory::Upcoming => "Upcoming",
            MatchCategory::Finished => "Finished",
        }
    }

    fn index(&self) -> usize {
        match self {
            MatchCategory::Live => 0,
            MatchCategory::OnBreak => 1,
            MatchCategory::Upcoming => 2,
            MatchCategory::Finished => 3,
        }
    }
}

impl fmt::Display for MatchCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for MatchCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "live" => Ok(MatchCategory::Live),
            "break" | "onbreak" | "on-break" | "on_break" => Ok(MatchCategory::OnBreak),
            "upcoming" | "scheduled" => Ok(MatchCategory::Upcoming),
            "finished" | "results" => Ok(MatchCategory::Finished),
            _ => Err(format!(
                "Unknown status '{}'. Use live, break, upcoming or finished",
                s
            )),
        }
    }
}

/// Category filter cycled through in the tournament panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchFilter {
    #[default]
    All,
    Only(MatchCategory),
}

impl MatchFilter {
    pub const ALL: [MatchFilter; 5] = [
        MatchFilter::All,
        MatchFilter::Only(MatchCategory::Live),
        MatchFilter::Only(MatchCategory::OnBreak),
        MatchFilter::Only(MatchCategory::Upcoming),
        MatchFilter::Only(MatchCategory::Finished),
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MatchFilter::All => "All",
            MatchFilter::Only(category) => category.label(),
        }
    }

    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        let idx = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Apply this filter to an already categorized list
    pub fn apply(&self, entries: &[MatchListEntry]) -> Vec<MatchListEntry> {
        match self {
            MatchFilter::All => entries.to_vec(),
            MatchFilter::Only(category) => filter_category(entries, *category),
        }
    }
}

/// One row of the rendered match list
#[derive(Debug, Clone, PartialEq)]
pub enum MatchListEntry {
    StatusHeader {
        category: MatchCategory,
        count: usize,
    },
    RoundHeader {
        category: MatchCategory,
        round: Option<i32>,
        name: String,
    },
    Match {
        category: MatchCategory,
        record: MatchRecord,
    },
}

impl MatchListEntry {
    pub fn category(&self) -> MatchCategory {
        match self {
            MatchListEntry::StatusHeader { category, .. }
            | MatchListEntry::RoundHeader { category, .. }
            | MatchListEntry::Match { category, .. } => *category,
        }
    }

    pub fn as_match(&self) -> Option<&MatchRecord> {
        match self {
            MatchListEntry::Match { record, .. } => Some(record),
            _ => None,
        }
    }

    pub fn is_header(&self) -> bool {
        !matches!(self, MatchListEntry::Match { .. })
    }
}

/// Human-readable name of a numeric round
pub fn round_name(round: i32) -> String {
    match round {
        r if r >= 15 => "Final".to_string(),
        14 => "Semi-Finals".to_string(),
        13 => "Quarter-Finals".to_string(),
        12 => "Last 16".to_string(),
        11 => "Last 32".to_string(),
        10 => "Last 64".to_string(),
        9 => "Last 128".to_string(),
        r => format!("Round {}", r),
    }
}

/// Round name for an optional round; matches without a round are grouped as "Round TBD"
pub fn round_label(round: Option<i32>) -> String {
    match round {
        Some(r) => round_name(r),
        None => "Round TBD".to_string(),
    }
}

/// Best-of format and prize money per round of one event
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoundInfo {
    pub formats: BTreeMap<i32, RoundFormat>,
    pub prizes: RoundPrizes,
}

impl RoundInfo {
    /// "Best of 11, £50K" for a round, if anything is known about it
    pub fn details(&self, round: Option<i32>) -> Option<String> {
        let round = round?;
        let parts: Vec<String> = [
            self.formats.get(&round).and_then(RoundFormat::format_text),
            self.prizes.get(&round).cloned(),
        ]
        .into_iter()
        .flatten()
        .collect();
        (!parts.is_empty()).then(|| parts.join(", "))
    }

    /// Round header text, e.g. "Quarter-Finals (Best of 11, £50K)"
    pub fn header_label(&self, name: &str, round: Option<i32>) -> String {
        match self.details(round) {
            Some(details) => format!("{} ({})", name, details),
            None => name.to_string(),
        }
    }
}

/// Header text for a round, decorated when round info is available
pub fn round_header_label(name: &str, round: Option<i32>, info: Option<&RoundInfo>) -> String {
    info.map_or_else(|| name.to_string(), |info| info.header_label(name, round))
}

/// Distinct rounds present in a match list, ascending
pub fn distinct_rounds(matches: &[MatchRecord]) -> Vec<i32> {
    let mut rounds: Vec<i32> = matches.iter().filter_map(|m| m.round).collect();
    rounds.sort_unstable();
    rounds.dedup();
    rounds
}

/// Ascending with missing values last
fn cmp_present_first<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Time used to order finished matches: end, else start, else scheduled
fn finished_time(m: &MatchRecord) -> Option<DateTime<Utc>> {
    m.end_date.or(m.start_date).or(m.scheduled_date)
}

/// Round ascending, scheduled time ascending, number ascending
fn compare_pending(a: &MatchRecord, b: &MatchRecord) -> Ordering {
    cmp_present_first(a.round, b.round)
        .then_with(|| cmp_present_first(a.scheduled_date, b.scheduled_date))
        .then_with(|| a.number.cmp(&b.number))
}

/// Round descending, end/start/scheduled time descending, number ascending
fn compare_finished(a: &MatchRecord, b: &MatchRecord) -> Ordering {
    cmp_present_first(a.round.map(Reverse), b.round.map(Reverse))
        .then_with(|| cmp_present_first(finished_time(a).map(Reverse), finished_time(b).map(Reverse)))
        .then_with(|| a.number.cmp(&b.number))
}

/// Partition, sort and flatten matches into a renderable list
///
/// Categories appear in the order live, on break, upcoming, finished; empty
/// categories are omitted. Each category starts with a status header, and a
/// round header precedes the first match of every round within it.
pub fn categorize_matches(matches: &[MatchRecord]) -> Vec<MatchListEntry> {
    let mut buckets: [Vec<&MatchRecord>; 4] = Default::default();
    for m in matches {
        let category = MatchCategory::from_status_code(m.status_code);
        buckets[category.index()].push(m);
    }

    let mut entries = Vec::with_capacity(matches.len() + 8);

    for category in MatchCategory::ALL {
        let bucket = &mut buckets[category.index()];
        if bucket.is_empty() {
            continue;
        }

        if category == MatchCategory::Finished {
            bucket.sort_by(|a, b| compare_finished(a, b));
        } else {
            bucket.sort_by(|a, b| compare_pending(a, b));
        }

        entries.push(MatchListEntry::StatusHeader {
            category,
            count: bucket.len(),
        });

        let mut current_round: Option<Option<i32>> = None;
        for m in bucket.iter() {
            if current_round != Some(m.round) {
                current_round = Some(m.round);
                entries.push(MatchListEntry::RoundHeader {
                    category,
                    round: m.round,
                    name: round_label(m.round),
                });
            }
            entries.push(MatchListEntry::Match {
                category,
                record: (*m).clone(),
            });
        }
    }

    entries
}

/// Keep only the rows of one category, including its status header
pub fn filter_category(entries: &[MatchListEntry], category: MatchCategory) -> Vec<MatchListEntry> {
    entries
        .iter()
        .filter(|e| e.category() == category)
        .cloned()
        .collect()
}

/// Number of matches per category, indexed in `MatchCategory::ALL` order
pub fn count_by_category(entries: &[MatchListEntry]) -> [usize; 4] {
    let mut counts = [0; 4];
    for entry in entries {
        if let MatchListEntry::Match { category, .. } = entry {
            counts[category.index()] += 1;
        }
    }
    counts
}

/// Indices of selectable (non-header) rows
pub fn match_positions(entries: &[MatchListEntry]) -> Vec<usize> {
    entries
        .iter()
        .enumerate()
        .filter(|(_, e)| !e.is_header())
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> Option<DateTime<Utc>> {
        Utc.with_ymd_and_hms(2025, 11, day, hour, 0, 0).single()
    }

    fn m(id: i64, status: Option<i32>, round: Option<i32>, number: i32) -> MatchRecord {
        MatchRecord {
            id,
            event_id: 1,
            status_code: status,
            round,
            number,
            ..Default::default()
        }
    }

    fn ids(entries: &[MatchListEntry]) -> Vec<i64> {
        entries.iter().filter_map(|e| e.as_match()).map(|r| r.id).collect()
    }

    #[test]
    fn test_round_name_table() {
        assert_eq!(round_name(15), "Final");
        assert_eq!(round_name(16), "Final");
        assert_eq!(round_name(14), "Semi-Finals");
        assert_eq!(round_name(13), "Quarter-Finals");
        assert_eq!(round_name(12), "Last 16");
        assert_eq!(round_name(11), "Last 32");
        assert_eq!(round_name(10), "Last 64");
        assert_eq!(round_name(9), "Last 128");
        assert_eq!(round_name(8), "Round 8");
        assert_eq!(round_name(1), "Round 1");
        assert_eq!(round_label(None), "Round TBD");
    }

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(MatchCategory::from_status_code(Some(0)), MatchCategory::Upcoming);
        assert_eq!(MatchCategory::from_status_code(Some(1)), MatchCategory::Live);
        assert_eq!(MatchCategory::from_status_code(Some(2)), MatchCategory::OnBreak);
        assert_eq!(MatchCategory::from_status_code(Some(3)), MatchCategory::Finished);
        assert_eq!(MatchCategory::from_status_code(Some(7)), MatchCategory::Upcoming);
        assert_eq!(MatchCategory::from_status_code(Some(-1)), MatchCategory::Upcoming);
        assert_eq!(MatchCategory::from_status_code(None), MatchCategory::Upcoming);
    }

    #[test]
    fn test_empty_input_yields_empty_list() {
        assert!(categorize_matches(&[]).is_empty());
    }

    #[test]
    fn test_categories_in_display_order_with_headers() {
        let matches = vec![
            m(1, Some(3), Some(10), 1),
            m(2, Some(0), Some(10), 1),
            m(3, Some(2), Some(10), 1),
            m(4, Some(1), Some(10), 1),
        ];
        let entries = categorize_matches(&matches);

        let headers: Vec<MatchCategory> = entries
            .iter()
            .filter_map(|e| match e {
                MatchListEntry::StatusHeader { category, .. } => Some(*category),
                _ => None,
            })
            .collect();
        assert_eq!(
            headers,
            vec![
                MatchCategory::Live,
                MatchCategory::OnBreak,
                MatchCategory::Upcoming,
                MatchCategory::Finished
            ]
        );
        assert_eq!(ids(&entries), vec![4, 3, 2, 1]);
        // status header, round header, match per category
        assert_eq!(entries.len(), 12);
    }

    #[test]
    fn test_unknown_status_falls_back_to_upcoming() {
        let matches = vec![m(1, Some(9), Some(1), 1), m(2, None, Some(1), 2)];
        let entries = categorize_matches(&matches);
        assert_eq!(
            entries[0],
            MatchListEntry::StatusHeader {
                category: MatchCategory::Upcoming,
                count: 2
            }
        );
        assert_eq!(ids(&entries), vec![1, 2]);
    }

    #[test]
    fn test_upcoming_sorted_by_round_then_schedule_then_number() {
        let mut a = m(1, Some(0), Some(2), 3);
        a.scheduled_date = at(20, 10);
        let mut b = m(2, Some(0), Some(1), 5);
        b.scheduled_date = at(21, 10);
        let mut c = m(3, Some(0), Some(1), 4);
        c.scheduled_date = at(20, 14);
        let mut d = m(4, Some(0), Some(1), 1);
        d.scheduled_date = at(20, 14);
        let mut e = m(5, Some(0), Some(1), 0);
        e.scheduled_date = None;

        let entries = categorize_matches(&[a, b, c, d, e]);
        // round 1: d (14:00 #1), c (14:00 #4), b (next day), e (no schedule); then round 2
        assert_eq!(ids(&entries), vec![4, 3, 2, 5, 1]);
    }

    #[test]
    fn test_finished_sorted_by_round_desc_then_time_desc() {
        let mut early = m(1, Some(3), Some(13), 2);
        early.end_date = at(25, 15);
        let mut late = m(2, Some(3), Some(13), 1);
        late.end_date = at(25, 21);
        let mut final_match = m(3, Some(3), Some(15), 1);
        final_match.end_date = at(27, 22);
        let mut first_round = m(4, Some(3), Some(1), 7);
        first_round.end_date = at(20, 12);

        let entries = categorize_matches(&[early, first_round, late, final_match]);
        assert_eq!(ids(&entries), vec![3, 2, 1, 4]);
    }

    #[test]
    fn test_finished_time_falls_back_to_start_then_scheduled() {
        let mut by_end = m(1, Some(3), Some(12), 1);
        by_end.end_date = at(22, 12);
        by_end.start_date = at(22, 9);
        let mut by_start = m(2, Some(3), Some(12), 2);
        by_start.start_date = at(22, 18);
        let mut by_schedule = m(3, Some(3), Some(12), 3);
        by_schedule.scheduled_date = at(22, 15);
        let no_time = m(4, Some(3), Some(12), 0);

        let entries = categorize_matches(&[by_end, no_time, by_schedule, by_start]);
        assert_eq!(ids(&entries), vec![2, 3, 1, 4]);
    }

    #[test]
    fn test_finished_ties_broken_by_number_ascending() {
        let mut a = m(1, Some(3), Some(11), 8);
        a.end_date = at(23, 20);
        let mut b = m(2, Some(3), Some(11), 2);
        b.end_date = at(23, 20);
        let entries = categorize_matches(&[a, b]);
        assert_eq!(ids(&entries), vec![2, 1]);
    }

    #[test]
    fn test_round_headers_emitted_on_round_change() {
        let matches = vec![
            m(1, Some(0), Some(9), 1),
            m(2, Some(0), Some(9), 2),
            m(3, Some(0), Some(10), 1),
            m(4, Some(0), None, 1),
        ];
        let entries = categorize_matches(&matches);
        let round_headers: Vec<(Option<i32>, String)> = entries
            .iter()
            .filter_map(|e| match e {
                MatchListEntry::RoundHeader { round, name, .. } => Some((*round, name.clone())),
                _ => None,
            })
            .collect();
        assert_eq!(
            round_headers,
            vec![
                (Some(9), "Last 128".to_string()),
                (Some(10), "Last 64".to_string()),
                (None, "Round TBD".to_string()),
            ]
        );
        assert!(matches!(entries[1], MatchListEntry::RoundHeader { .. }));
        assert!(matches!(entries[2], MatchListEntry::Match { .. }));
        assert!(matches!(entries[3], MatchListEntry::Match { .. }));
        assert!(matches!(entries[4], MatchListEntry::RoundHeader { .. }));
    }

    #[test]
    fn test_round_header_repeated_per_category() {
        let matches = vec![m(1, Some(1), Some(12), 1), m(2, Some(3), Some(12), 2)];
        let entries = categorize_matches(&matches);
        let round_header_count = entries
            .iter()
            .filter(|e| matches!(e, MatchListEntry::RoundHeader { .. }))
            .count();
        assert_eq!(round_header_count, 2);
    }

    #[test]
    fn test_filter_category_keeps_header() {
        let matches = vec![
            m(1, Some(1), Some(12), 1),
            m(2, Some(3), Some(12), 2),
            m(3, Some(3), Some(11), 1),
        ];
        let entries = categorize_matches(&matches);
        let finished = filter_category(&entries, MatchCategory::Finished);

        assert_eq!(
            finished[0],
            MatchListEntry::StatusHeader {
                category: MatchCategory::Finished,
                count: 2
            }
        );
        assert_eq!(ids(&finished), vec![2, 3]);
        assert!(finished.iter().all(|e| e.category() == MatchCategory::Finished));
    }

    #[test]
    fn test_filter_on_empty_category_is_empty() {
        let entries = categorize_matches(&[m(1, Some(0), Some(1), 1)]);
        assert!(filter_category(&entries, MatchCategory::Live).is_empty());
    }

    #[test]
    fn test_match_filter_apply_and_cycle() {
        let entries = categorize_matches(&[m(1, Some(1), Some(1), 1), m(2, Some(0), Some(1), 2)]);
        assert_eq!(MatchFilter::All.apply(&entries), entries);
        assert_eq!(
            ids(&MatchFilter::Only(MatchCategory::Upcoming).apply(&entries)),
            vec![2]
        );

        assert_eq!(MatchFilter::All.next(), MatchFilter::Only(MatchCategory::Live));
        assert_eq!(
            MatchFilter::Only(MatchCategory::Finished).next(),
            MatchFilter::All
        );
        assert_eq!(
            MatchFilter::All.prev(),
            MatchFilter::Only(MatchCategory::Finished)
        );
    }

    #[test]
    fn test_count_by_category_and_positions() {
        let matches = vec![
            m(1, Some(1), Some(12), 1),
            m(2, Some(3), Some(12), 2),
            m(3, Some(3), Some(11), 1),
        ];
        let entries = categorize_matches(&matches);
        assert_eq!(count_by_category(&entries), [1, 0, 0, 2]);

        let positions = match_positions(&entries);
        assert_eq!(positions.len(), 3);
        assert!(positions.iter().all(|&i| !entries[i].is_header()));
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("LIVE".parse::<MatchCategory>(), Ok(MatchCategory::Live));
        assert_eq!("break".parse::<MatchCategory>(), Ok(MatchCategory::OnBreak));
        assert_eq!("finished".parse::<MatchCategory>(), Ok(MatchCategory::Finished));
        assert!("paused".parse::<MatchCategory>().is_err());
    }

    #[test]
    fn test_round_info_header_label() {
        let mut info = RoundInfo::default();
        info.formats.insert(
            13,
            RoundFormat { round: 13, distance: Some(6), ..Default::default() },
        );
        info.prizes.insert(13, "£50K".to_string());
        info.prizes.insert(15, "£250K".to_string());

        assert_eq!(info.header_label("Quarter-Finals", Some(13)), "Quarter-Finals (Best of 11, £50K)");
        assert_eq!(info.header_label("Final", Some(15)), "Final (£250K)");
        assert_eq!(info.header_label("Last 16", Some(12)), "Last 16");
        assert_eq!(info.header_label("Round TBD", None), "Round TBD");
        assert_eq!(round_header_label("Last 16", Some(12), None), "Last 16");
    }

    #[test]
    fn test_distinct_rounds() {
        let matches = vec![
            m(1, Some(0), Some(13), 1),
            m(2, Some(3), Some(11), 1),
            m(3, Some(0), None, 1),
            m(4, Some(1), Some(13), 2),
        ];
        assert_eq!(distinct_rounds(&matches), vec![11, 13]);
    }
}
