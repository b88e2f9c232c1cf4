//! Header-line dialects of WhatsApp exports.
//!
//! Exports vary by platform and app version. Each [`Dialect`] is an
//! immutable pattern descriptor: a regex recognizing the timestamp shape of
//! one dialect plus the field-order rule for interpreting its date. The
//! descriptors are tried in a fixed priority order, so a line that happens
//! to satisfy several shapes always resolves the same way.
//!
//! Supported shapes:
//! - `[10/1/25, 11:58:38] ~Name: Message` (bracketed, seconds, tilde sender)
//! - `[01.01.2024, 12:34] Name: Message` (bracketed)
//! - `01.01.2024, 12:34 - Name: Message` (dash-delimited)

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use regex::Regex;

/// Two-digit years at or above this value belong to the 1900s.
///
/// Keeps a `95` in an old export from turning into 2095.
const YEAR_PIVOT: u32 = 70;

/// Recognized header-line dialects, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Newer mobile export: `[10/1/25, 11:58:38] ~Name: Message`.
    ///
    /// Slash date, mandatory seconds, sender prefixed with `~`, and often a
    /// leading U+200E direction mark before the bracket.
    BracketedSlash,
    /// Bracketed export: `[01.01.2024, 12:34] Name: Message`.
    ///
    /// Dot or slash date, optional seconds, optional AM/PM.
    BracketedDot,
    /// Dash-delimited export: `01.01.2024, 12:34 - Name: Message`.
    DashDelimited,
}

impl Dialect {
    /// Returns the regex pattern for this dialect.
    ///
    /// Every pattern captures three groups: date, time, and the remainder
    /// after the timestamp (sender and body, still joined).
    pub fn pattern(self) -> &'static str {
        match self {
            // [10/1/25, 11:58:38] ~Name: Message
            Dialect::BracketedSlash => {
                r"^[\x{200E}\x{200F}]*\[(\d{1,2}/\d{1,2}/\d{2,4}),?\s+(\d{1,2}:\d{2}:\d{2})\]\s*(.*)$"
            }
            // [01.01.2024, 12:34] Name: Message
            Dialect::BracketedDot => {
                r"^[\x{200E}\x{200F}]*\[(\d{1,2}[./]\d{1,2}[./]\d{2,4}),?\s+(\d{1,2}:\d{2}(?::\d{2})?(?:\s?[APap][Mm])?)\]\s*(.*)$"
            }
            // 01.01.2024, 12:34 - Name: Message
            Dialect::DashDelimited => {
                r"^(\d{1,2}[./]\d{1,2}[./]\d{2,4}),?\s+(\d{1,2}:\d{2}(?::\d{2})?(?:\s?[APap][Mm])?)\s+-\s+(.*)$"
            }
        }
    }

    /// Returns all dialects in matching priority order.
    pub fn all() -> &'static [Dialect] {
        &[
            Dialect::BracketedSlash,
            Dialect::BracketedDot,
            Dialect::DashDelimited,
        ]
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::BracketedSlash => write!(f, "bracketed-slash"),
            Dialect::BracketedDot => write!(f, "bracketed"),
            Dialect::DashDelimited => write!(f, "dash-delimited"),
        }
    }
}

/// The raw captures of a matched header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawHeader<'a> {
    /// Which dialect matched.
    pub dialect: Dialect,
    /// The date portion, e.g. `10/1/25`.
    pub date: &'a str,
    /// The time portion, e.g. `11:58:38` or `12:34 PM`.
    pub time: &'a str,
    /// Everything after the timestamp: sender and body, still joined.
    pub rest: &'a str,
}

/// Compiled header patterns, tried in priority order.
pub struct HeaderScanner {
    patterns: Vec<(Dialect, Regex)>,
}

impl HeaderScanner {
    /// Compiles all dialect patterns.
    pub fn new() -> Self {
        Self {
            patterns: Dialect::all()
                .iter()
                .map(|&d| (d, Regex::new(d.pattern()).unwrap()))
                .collect(),
        }
    }

    /// Matches a physical line against the dialects; first match wins.
    pub fn scan<'a>(&self, line: &'a str) -> Option<RawHeader<'a>> {
        for (dialect, regex) in &self.patterns {
            if let Some(caps) = regex.captures(line) {
                // Three mandatory capture groups per pattern.
                let date = caps.get(1)?.as_str();
                let time = caps.get(2)?.as_str();
                let rest = caps.get(3)?.as_str();
                return Some(RawHeader {
                    dialect: *dialect,
                    date,
                    time,
                    rest,
                });
            }
        }
        None
    }
}

impl Default for HeaderScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Expands a two-digit year using the fixed pivot; four-digit years pass
/// through unchanged.
fn expand_year(year: u32) -> i32 {
    if year >= 100 {
        year as i32
    } else if year >= YEAR_PIVOT {
        1900 + year as i32
    } else {
        2000 + year as i32
    }
}

/// Parses the time portion of a header: `H:MM`, `H:MM:SS`, optional AM/PM.
fn parse_time(time: &str) -> Option<NaiveTime> {
    let time = time.trim();
    let (digits, meridiem) = match time.get(time.len().saturating_sub(2)..) {
        Some(tail) if tail.eq_ignore_ascii_case("am") || tail.eq_ignore_ascii_case("pm") => (
            time[..time.len() - 2].trim_end(),
            Some(tail.eq_ignore_ascii_case("pm")),
        ),
        _ => (time, None),
    };

    let mut parts = digits.split(':');
    let mut hour: u32 = parts.next()?.parse().ok()?;
    let minute: u32 = parts.next()?.parse().ok()?;
    let second: u32 = match parts.next() {
        Some(s) => s.parse().ok()?,
        None => 0,
    };
    if parts.next().is_some() {
        return None;
    }

    if let Some(is_pm) = meridiem {
        if hour == 0 || hour > 12 {
            return None;
        }
        if is_pm && hour < 12 {
            hour += 12;
        } else if !is_pm && hour == 12 {
            hour = 0;
        }
    }

    NaiveTime::from_hms_opt(hour, minute, second)
}

/// Assembles a timestamp from the captured date and time fields.
///
/// Dates are interpreted day-first; when the day-first reading is not a
/// valid calendar date (e.g. `1/15/24`), the month-first reading is tried
/// before giving up. Returns `None` when neither ordering yields a real
/// date; the caller downgrades such a line to a continuation.
pub fn parse_timestamp(date: &str, time: &str) -> Option<DateTime<Utc>> {
    let mut fields = date.split(['.', '/']);
    let a: u32 = fields.next()?.trim().parse().ok()?;
    let b: u32 = fields.next()?.trim().parse().ok()?;
    let y: u32 = fields.next()?.trim().parse().ok()?;
    if fields.next().is_some() {
        return None;
    }

    let year = expand_year(y);
    let time = parse_time(time)?;

    // Day-first, then month-first for ambiguous exports.
    let date = NaiveDate::from_ymd_opt(year, b, a).or_else(|| NaiveDate::from_ymd_opt(year, a, b))?;
    Some(date.and_time(time).and_utc())
}

/// Strips direction marks, the `~` sender prefix, and surrounding
/// whitespace from a captured sender name.
pub fn clean_sender(raw: &str) -> &str {
    raw.trim_matches(|c: char| {
        c.is_whitespace() || c == '\u{200E}' || c == '\u{200F}' || c == '\u{202A}' || c == '\u{202C}'
    })
    .trim_start_matches('~')
    .trim()
}
