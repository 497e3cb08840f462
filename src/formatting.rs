use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::api::MatchRecord;
use crate::config::DisplayConfig;
use crate::match_list::MatchCategory;

/// Box-drawing characters for borders and separators
#[derive(Debug, Clone, PartialEq)]
pub struct BoxChars {
    pub horizontal: String,
    pub double_horizontal: String,
    pub vertical: String,
    pub top_left: String,
    pub top_right: String,
    pub bottom_left: String,
    pub bottom_right: String,
    pub left_junction: String,
    pub right_junction: String,
    pub top_junction: String,
    pub bottom_junction: String,
    pub selector: String,
    pub live_marker: String,
}

impl BoxChars {
    pub fn unicode() -> Self {
        Self {
            horizontal: "─".to_string(),
            double_horizontal: "═".to_string(),
            vertical: "│".to_string(),
            top_left: "╭".to_string(),
            top_right: "╮".to_string(),
            bottom_left: "╰".to_string(),
            bottom_right: "╯".to_string(),
            left_junction: "├".to_string(),
            right_junction: "┤".to_string(),
            top_junction: "┬".to_string(),
            bottom_junction: "┴".to_string(),
            selector: "►".to_string(),
            live_marker: "●".to_string(),
        }
    }

    pub fn ascii() -> Self {
        Self {
            horizontal: "-".to_string(),
            double_horizontal: "=".to_string(),
            vertical: "|".to_string(),
            top_left: "+".to_string(),
            top_right: "+".to_string(),
            bottom_left: "+".to_string(),
            bottom_right: "+".to_string(),
            left_junction: "+".to_string(),
            right_junction: "+".to_string(),
            top_junction: "+".to_string(),
            bottom_junction: "+".to_string(),
            selector: ">".to_string(),
            live_marker: "*".to_string(),
        }
    }

    pub fn from_use_unicode(use_unicode: bool) -> Self {
        if use_unicode {
            Self::unicode()
        } else {
            Self::ascii()
        }
    }
}

impl Default for BoxChars {
    fn default() -> Self {
        Self::unicode()
    }
}

/// Format a header with text and underline
///
/// # Arguments
/// * `text` - The header text to display
/// * `double_line` - If true, uses double-line (═/=), otherwise single-line (─/-)
/// * `display` - Display configuration to determine unicode vs ASCII
pub fn format_header(text: &str, double_line: bool, display: &DisplayConfig) -> String {
    let separator_char = if double_line {
        &display.box_chars.double_horizontal
    } else {
        &display.box_chars.horizontal
    };
    format!("{}\n{}\n", text, separator_char.repeat(text.width()))
}

/// "5 - 3" when both scores are known, "vs" otherwise
pub fn format_score(m: &MatchRecord) -> String {
    match (m.score1, m.score2) {
        (Some(s1), Some(s2)) => format!("{} - {}", s1, s2),
        _ => "vs".to_string(),
    }
}

/// Player name for display; missing or blank names are shown as "TBD"
pub fn player_display_name(name: Option<&str>) -> &str {
    match name.map(str::trim) {
        Some(n) if !n.is_empty() => n,
        _ => "TBD",
    }
}

/// "Player One v Player Two"
pub fn format_pairing(m: &MatchRecord) -> String {
    format!(
        "{} v {}",
        player_display_name(m.player1_name.as_deref()),
        player_display_name(m.player2_name.as_deref())
    )
}

const NAME_WIDTH: usize = 24;

/// Trailing status column for a match row
fn match_suffix(m: &MatchRecord, category: MatchCategory, time_format: &str, display: &DisplayConfig) -> String {
    match category {
        MatchCategory::Live => format!("{} LIVE", display.box_chars.live_marker),
        MatchCategory::OnBreak => "BREAK".to_string(),
        MatchCategory::Upcoming => match_display_time(m)
            .map(|t| format_local_datetime(&t, time_format))
            .unwrap_or_else(|| "TBD".to_string()),
        MatchCategory::Finished => match m.winner_side() {
            Some(1) => format!("W: {}", player_display_name(m.player1_name.as_deref())),
            Some(_) => format!("W: {}", player_display_name(m.player2_name.as_deref())),
            None => String::new(),
        },
    }
}

/// One match row: number, players either side of the score, status column
pub fn format_match_line(
    m: &MatchRecord,
    category: MatchCategory,
    time_format: &str,
    display: &DisplayConfig,
) -> String {
    format!(
        "  {} {} {} {}  {}",
        pad_left(&format!("#{}", m.number), 4),
        pad_left(player_display_name(m.player1_name.as_deref()), NAME_WIDTH),
        pad_right(&format!("{:^7}", format_score(m)), 7),
        pad_right(player_display_name(m.player2_name.as_deref()), NAME_WIDTH),
        match_suffix(m, category, time_format, display)
    )
    .trim_end()
    .to_string()
}

/// Clock format used when none is configured or the configured one is invalid
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M";

/// Whether chrono can render `time_format` (no unknown `%` specifiers)
pub fn is_valid_time_format(time_format: &str) -> bool {
    !StrftimeItems::new(time_format).any(|item| matches!(item, Item::Error))
}

/// Format a UTC timestamp in the local timezone
pub fn format_local_time(dt: &DateTime<Utc>, time_format: &str) -> String {
    format_in_zone(dt, &Local, time_format)
}

/// Format a UTC timestamp in an arbitrary timezone
pub fn format_in_zone<Tz: TimeZone>(dt: &DateTime<Utc>, tz: &Tz, time_format: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let local = dt.with_timezone(tz);
    let mut out = String::new();
    if write!(out, "{}", local.format(time_format)).is_err() {
        out.clear();
        // DEFAULT_TIME_FORMAT only uses known specifiers
        let _ = write!(out, "{}", local.format(DEFAULT_TIME_FORMAT));
    }
    out
}

/// Short local day and time, e.g. "Sat 22 Nov 13:00"
pub fn format_local_datetime(dt: &DateTime<Utc>, time_format: &str) -> String {
    format_local_time(dt, &format!("%a %-d %b {}", time_format))
}

/// Best timestamp to show for a match row: start for started matches, else scheduled
pub fn match_display_time(m: &MatchRecord) -> Option<DateTime<Utc>> {
    m.start_date.or(m.scheduled_date)
}

/// Split a frame score string like "(64-21, 0-77)" into per-frame points
///
/// Malformed frames are skipped.
pub fn parse_frame_scores(s: &str) -> Vec<(u32, u32)> {
    s.trim()
        .trim_start_matches('(')
        .trim_end_matches(')')
        .split(',')
        .filter_map(|frame| {
            let (left, right) = frame.trim().split_once('-')?;
            let p1 = left.trim().parse().ok()?;
            let p2 = right.trim().parse().ok()?;
            Some((p1, p2))
        })
        .collect()
}

/// Parse a session string like "22.11.2025 13:00; 22.11.2025 19:00"
///
/// Sessions are in UTC; unparseable entries are skipped.
pub fn parse_sessions(s: &str) -> Vec<DateTime<Utc>> {
    s.split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter_map(|part| NaiveDateTime::parse_from_str(part, "%d.%m.%Y %H:%M").ok())
        .map(|naive| naive.and_utc())
        .collect()
}

/// Tournament date range, e.g. "16 Nov - 24 Nov 2025"
///
/// The year is only repeated when the range spans two years. A missing end
/// date shows the start alone; a missing start shows "TBD".
pub fn format_date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> String {
    match (start, end) {
        (None, _) => "TBD".to_string(),
        (Some(s), None) => s.format("%-d %b %Y").to_string(),
        (Some(s), Some(e)) if s == e => s.format("%-d %b %Y").to_string(),
        (Some(s), Some(e)) if s.year() == e.year() => {
            format!("{} - {}", s.format("%-d %b"), e.format("%-d %b %Y"))
        }
        (Some(s), Some(e)) => format!("{} - {}", s.format("%-d %b %Y"), e.format("%-d %b %Y")),
    }
}

/// Integer with thousands separators, e.g. 1,250,000
pub fn format_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if n < 0 {
        format!("-{}", out)
    } else {
        out
    }
}

/// Truncate to a display width, appending an ellipsis when cut
pub fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > max_width - 1 {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push('…');
    out
}

/// Left-align in a fixed display width, truncating if needed
pub fn pad_right(s: &str, width: usize) -> String {
    let t = truncate(s, width);
    let pad = width.saturating_sub(t.width());
    format!("{}{}", t, " ".repeat(pad))
}

/// Right-align in a fixed display width, truncating if needed
pub fn pad_left(s: &str, width: usize) -> String {
    let t = truncate(s, width);
    let pad = width.saturating_sub(t.width());
    format!("{}{}", " ".repeat(pad), t)
}
