//! Filtering and pagination over the parsed dataset.
//!
//! [`FilterConfig`] describes the active criteria; [`apply_filters`]
//! evaluates them against a message slice and returns borrowed matches;
//! the canonical dataset is never copied or mutated. Filters combine with
//! AND logic.
//!
//! # Examples
//!
//! ```
//! use chatlens::filter::{FilterConfig, apply_filters};
//! use chatlens::message::Message;
//!
//! let messages = vec![
//!     Message::user("Alice", "Hello"),
//!     Message::user("Bob", "Hi there"),
//!     Message::system("security code changed"),
//! ];
//!
//! // System messages are hidden by default.
//! let all = apply_filters(&messages, &FilterConfig::new());
//! assert_eq!(all.len(), 2);
//!
//! let alice = apply_filters(&messages, &FilterConfig::new().with_sender("alice"));
//! assert_eq!(alice.len(), 1);
//! ```

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::{ChatlensError, Result};
use crate::message::Message;

/// Criteria for selecting messages out of a parsed transcript.
///
/// All filters are optional; an empty config passes every non-system
/// message through.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Include only messages on or after this timestamp.
    pub after: Option<DateTime<Utc>>,

    /// Include only messages on or before this timestamp.
    pub before: Option<DateTime<Utc>>,

    /// Include only messages from this sender (case-insensitive).
    pub sender: Option<String>,

    /// Include only messages whose body contains this text
    /// (case-insensitive substring).
    pub query: Option<String>,

    /// Also include system messages (default: false).
    pub include_system: bool,
}

impl FilterConfig {
    /// Creates an empty filter configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date (inclusive), format `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self> {
        let naive = parse_iso_date(date_str)?;
        // Start of the day.
        self.after = Some(naive.and_hms_opt(0, 0, 0).unwrap().and_utc());
        Ok(self)
    }

    /// Sets the end date (inclusive), format `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self> {
        let naive = parse_iso_date(date_str)?;
        // End of the day to include the full day.
        self.before = Some(naive.and_hms_opt(23, 59, 59).unwrap().and_utc());
        Ok(self)
    }

    /// Sets the sender filter (case-insensitive match).
    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    /// Sets the full-text query (case-insensitive substring).
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Includes system messages in the result.
    #[must_use]
    pub fn with_system_messages(mut self, include: bool) -> Self {
        self.include_system = include;
        self
    }

    /// Sets the start timestamp directly.
    #[must_use]
    pub fn with_after(mut self, dt: DateTime<Utc>) -> Self {
        self.after = Some(dt);
        self
    }

    /// Sets the end timestamp directly.
    #[must_use]
    pub fn with_before(mut self, dt: DateTime<Utc>) -> Self {
        self.before = Some(dt);
        self
    }

    /// Returns `true` if any criterion beyond the system toggle is active.
    pub fn is_active(&self) -> bool {
        self.after.is_some()
            || self.before.is_some()
            || self.sender.is_some()
            || self.query.is_some()
    }

    /// Returns `true` if date bounds are active.
    pub fn has_date_filter(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    fn matches(&self, msg: &Message) -> bool {
        if msg.is_system && !self.include_system {
            return false;
        }

        if let Some(ref sender) = self.sender {
            match msg.sender() {
                Some(s) if s.eq_ignore_ascii_case(sender) => {}
                _ => return false,
            }
        }

        if let Some(ref query) = self.query {
            if !msg.body.to_lowercase().contains(&query.to_lowercase()) {
                return false;
            }
        }

        if self.has_date_filter() {
            // Undated messages are excluded once a date bound is set.
            let Some(ts) = msg.timestamp else {
                return false;
            };
            if self.after.is_some_and(|after| ts < after) {
                return false;
            }
            if self.before.is_some_and(|before| ts > before) {
                return false;
            }
        }

        true
    }
}

fn parse_iso_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| ChatlensError::invalid_date(date_str))
}

/// Selects the messages matching all active criteria, preserving order.
///
/// Borrows from the dataset; the input is never mutated.
pub fn apply_filters<'a>(messages: &'a [Message], config: &FilterConfig) -> Vec<&'a Message> {
    messages.iter().filter(|m| config.matches(m)).collect()
}

/// One page of a filtered result set.
#[derive(Debug, Clone)]
pub struct Page<'a> {
    /// The messages on this page, in dataset order.
    pub items: Vec<&'a Message>,
    /// 1-based page number after clamping.
    pub number: usize,
    /// Total number of pages (at least 1).
    pub total_pages: usize,
    /// Total matches across all pages.
    pub total_items: usize,
    /// 1-based index of the first item on this page (0 when empty).
    pub first_index: usize,
}

/// Cuts a filtered result set into pages.
///
/// `per_page == 0` means everything on one page. An out-of-range `page` is
/// clamped into `1..=total_pages` rather than erroring, so the viewer's
/// pager always lands somewhere sensible.
pub fn paginate<'a>(messages: &[&'a Message], page: usize, per_page: usize) -> Page<'a> {
    let total_items = messages.len();
    if per_page == 0 || total_items == 0 {
        return Page {
            items: messages.to_vec(),
            number: 1,
            total_pages: 1,
            total_items,
            first_index: usize::from(total_items > 0),
        };
    }

    let total_pages = total_items.div_ceil(per_page);
    let number = page.clamp(1, total_pages);
    let start = (number - 1) * per_page;
    let end = (start + per_page).min(total_items);

    Page {
        items: messages[start..end].to_vec(),
        number,
        total_pages,
        total_items,
        first_index: start + 1,
    }
}
