//! Aggregate statistics over parsed messages.
//!
//! [`ChatStats`] is straightforward counting over already-structured data:
//! totals, per-participant counts, a daily message series, and a
//! weekday-by-hour activity grid. It aggregates whatever iterator it is
//! given, so the caller chooses whether stats cover the full dataset or a
//! filtered view.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Timelike};
use serde::Serialize;

use crate::message::Message;

/// Aggregated counts for a set of messages.
///
/// Time-based aggregations (daily series, heatmap, days covered) skip
/// messages without a timestamp; the plain counters include everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChatStats {
    /// Total messages seen.
    pub total_messages: u64,
    /// Messages classified as system notices.
    pub system_messages: u64,
    /// Messages carrying at least one attachment reference.
    pub media_messages: u64,
    /// Message count per sender, sorted by name.
    pub per_sender: BTreeMap<String, u64>,
    /// Message count per calendar day, sorted by day.
    pub daily: Vec<(NaiveDate, u64)>,
    /// Activity grid: `heatmap[weekday][hour]`, Monday is row 0.
    pub heatmap: [[u64; 24]; 7],
}

impl ChatStats {
    /// Aggregates statistics over the given messages.
    pub fn collect<'a>(messages: impl IntoIterator<Item = &'a Message>) -> Self {
        let mut stats = ChatStats::default();
        let mut daily: BTreeMap<NaiveDate, u64> = BTreeMap::new();

        for msg in messages {
            stats.total_messages += 1;
            if msg.is_system {
                stats.system_messages += 1;
            }
            if msg.has_attachments() {
                stats.media_messages += 1;
            }
            if let Some(sender) = msg.sender() {
                *stats.per_sender.entry(sender.to_string()).or_insert(0) += 1;
            }
            if let Some(ts) = msg.timestamp {
                *daily.entry(ts.date_naive()).or_insert(0) += 1;
                let weekday = ts.weekday().num_days_from_monday() as usize;
                let hour = ts.hour() as usize;
                stats.heatmap[weekday][hour] += 1;
            }
        }

        stats.daily = daily.into_iter().collect();
        stats
    }

    /// Number of distinct senders.
    pub fn participants(&self) -> usize {
        self.per_sender.len()
    }

    /// Number of distinct calendar days with at least one dated message.
    pub fn days_covered(&self) -> usize {
        self.daily.len()
    }

    /// The day with the most messages, if any message carried a timestamp.
    pub fn busiest_day(&self) -> Option<(NaiveDate, u64)> {
        self.daily.iter().max_by_key(|(_, count)| *count).copied()
    }

    /// The busiest `(weekday, hour)` slot, Monday = 0. `None` when no
    /// message carried a timestamp.
    pub fn busiest_slot(&self) -> Option<(usize, usize, u64)> {
        let mut best: Option<(usize, usize, u64)> = None;
        for (weekday, hours) in self.heatmap.iter().enumerate() {
            for (hour, &count) in hours.iter().enumerate() {
                if count > 0 && best.is_none_or(|(_, _, c)| count > c) {
                    best = Some((weekday, hour, count));
                }
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use crate::message::AttachmentRef;

    fn msg(sender: &str, day: u32, hour: u32) -> Message {
        // June 2024: the 3rd is a Monday.
        Message::user(sender, "x")
            .with_timestamp(Utc.with_ymd_and_hms(2024, 6, day, hour, 0, 0).unwrap())
    }

    #[test]
    fn counts_totals_and_senders() {
        let messages = vec![
            msg("Alice", 3, 9),
            msg("Alice", 3, 10),
            msg("Bob", 4, 9),
            Message::system("notice"),
        ];

        let stats = ChatStats::collect(&messages);
        assert_eq!(stats.total_messages, 4);
        assert_eq!(stats.system_messages, 1);
        assert_eq!(stats.participants(), 2);
        assert_eq!(stats.per_sender["Alice"], 2);
        assert_eq!(stats.per_sender["Bob"], 1);
    }

    #[test]
    fn media_count_uses_attachments() {
        let with_media = Message::user("A", "IMG_1.jpg (file attached)")
            .with_attachments(vec![AttachmentRef::new("IMG_1.jpg")]);
        let without = Message::user("A", "plain");

        let stats = ChatStats::collect([&with_media, &without]);
        assert_eq!(stats.media_messages, 1);
    }

    #[test]
    fn daily_series_sorted() {
        let messages = vec![msg("A", 5, 9), msg("A", 3, 9), msg("A", 5, 10)];
        let stats = ChatStats::collect(&messages);

        assert_eq!(stats.days_covered(), 2);
        assert_eq!(stats.daily[0].0, NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
        assert_eq!(stats.daily[1], (NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(), 2));
        assert_eq!(stats.busiest_day().unwrap().1, 2);
    }

    #[test]
    fn heatmap_rows_are_monday_first() {
        // 2024-06-03 is a Monday.
        let stats = ChatStats::collect(&[msg("A", 3, 14), msg("A", 3, 14), msg("A", 4, 8)]);

        assert_eq!(stats.heatmap[0][14], 2); // Monday 14:00
        assert_eq!(stats.heatmap[1][8], 1); // Tuesday 08:00
        assert_eq!(stats.busiest_slot(), Some((0, 14, 2)));
    }

    #[test]
    fn undated_messages_skip_time_aggregations() {
        let stats = ChatStats::collect(&[Message::user("A", "undated")]);
        assert_eq!(stats.total_messages, 1);
        assert_eq!(stats.days_covered(), 0);
        assert!(stats.busiest_day().is_none());
        assert!(stats.busiest_slot().is_none());
    }

    #[test]
    fn empty_input() {
        let messages: Vec<Message> = Vec::new();
        let stats = ChatStats::collect(&messages);
        assert_eq!(stats, ChatStats::default());
    }
}
