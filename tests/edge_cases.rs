//! Edge case tests for chatlens
//!
//! Boundary conditions the regular unit and integration tests don't cover:
//! exotic input shapes, unicode-heavy transcripts, degenerate filters.

use chatlens::filter::{FilterConfig, apply_filters, paginate};
use chatlens::message::Message;
use chatlens::parser::TranscriptParser;
use chrono::{TimeZone, Utc};

fn parse(text: &str) -> chatlens::parser::Transcript {
    TranscriptParser::new().parse_str(text)
}

// =========================================================================
// Unicode and special characters
// =========================================================================

#[test]
fn unicode_senders_and_bodies() {
    let t = parse(
        "01.01.2024, 12:34 - Иван: Привет мир!\n\
         01.01.2024, 12:35 - 田中太郎: こんにちは世界！\n\
         01.01.2024, 12:36 - محمد: مرحبا بالعالم",
    );
    assert_eq!(t.len(), 3);
    assert_eq!(t.messages[0].sender(), Some("Иван"));
    assert_eq!(t.messages[1].body, "こんにちは世界！");
    assert_eq!(t.messages[2].sender(), Some("محمد"));
}

#[test]
fn emoji_in_sender_names() {
    let t = parse("01.01.2024, 12:34 - Самат🦅: қалайсың");
    assert_eq!(t.messages[0].sender(), Some("Самат🦅"));
}

#[test]
fn colon_inside_body_does_not_split_twice() {
    let t = parse("01.01.2024, 12:34 - Alice: note: this has colons: many");
    assert_eq!(t.messages[0].sender(), Some("Alice"));
    assert_eq!(t.messages[0].body, "note: this has colons: many");
}

#[test]
fn direction_marks_stripped_from_sender_only() {
    let t = parse("\u{200E}[10/1/25, 11:58:38] \u{200E}~Alice: body \u{200E}text");
    assert_eq!(t.messages[0].sender(), Some("Alice"));
    assert!(t.messages[0].body.contains("\u{200E}text"));
}

// =========================================================================
// Degenerate inputs
// =========================================================================

#[test]
fn single_header_line_no_newline() {
    let t = parse("01.01.2024, 12:34 - Alice: hi");
    assert_eq!(t.len(), 1);
    assert_eq!(t.diagnostics.continuation_lines, 0);
}

#[test]
fn only_orphan_lines() {
    let t = parse("one\ntwo\nthree");
    assert!(t.is_empty());
    assert_eq!(t.diagnostics.orphan_lines, 3);
}

#[test]
fn windows_line_endings() {
    let t = parse("01.01.2024, 12:34 - Alice: hi\r\nsecond\r\n");
    assert_eq!(t.len(), 1);
    assert_eq!(t.messages[0].body, "hi\nsecond");
}

#[test]
fn header_with_colon_but_no_body_is_system() {
    // Once trailing whitespace is normalized away there is no ": "
    // delimiter left, so the line has no colon-delimited sender.
    let t = parse("01.01.2024, 12:34 - Alice: ");
    assert_eq!(t.len(), 1);
    assert!(t.messages[0].is_system);
    assert_eq!(t.messages[0].sender(), None);
}

#[test]
fn trailing_blank_lines_trimmed_from_body() {
    let t = parse("01.01.2024, 12:34 - Alice: hi\n\n\n");
    assert_eq!(t.messages[0].body, "hi");
    // The blank lines were still consumed as continuations.
    assert_eq!(t.diagnostics.continuation_lines, 2);
}

#[test]
fn very_long_message_body() {
    let long_line = "x".repeat(100 * 1024);
    let t = parse(&format!("01.01.2024, 12:34 - Alice: {long_line}"));
    assert_eq!(t.messages[0].body.len(), 100 * 1024);
}

#[test]
fn thousands_of_continuations() {
    let mut text = String::from("01.01.2024, 12:34 - Alice: start");
    for i in 0..5000 {
        text.push_str(&format!("\nline {i}"));
    }
    let t = parse(&text);
    assert_eq!(t.len(), 1);
    assert_eq!(t.diagnostics.continuation_lines, 5000);
    assert_eq!(t.messages[0].line_span.len(), 5001);
}

// =========================================================================
// Timestamp boundaries
// =========================================================================

#[test]
fn midnight_and_end_of_day() {
    let t = parse(
        "01.01.2024, 00:00 - A: start\n\
         01.01.2024, 23:59 - A: end",
    );
    assert_eq!(
        t.messages[0].timestamp,
        Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
    );
    assert_eq!(
        t.messages[1].timestamp,
        Some(Utc.with_ymd_and_hms(2024, 1, 1, 23, 59, 0).unwrap())
    );
}

#[test]
fn leap_day_parses() {
    let t = parse("29.02.2024, 12:00 - A: leap");
    assert!(t.messages[0].timestamp.is_some());

    // 2023 had no Feb 29; the header degrades instead of corrupting the parse.
    let t = parse("01.01.2024, 12:00 - A: ok\n29.02.2023, 12:00 - B: no such day");
    assert_eq!(t.len(), 1);
    assert_eq!(t.diagnostics.bad_timestamps, 1);
}

#[test]
fn out_of_order_timestamps_are_preserved() {
    // The parser never reorders; ordering is a property of the input.
    let t = parse(
        "02.01.2024, 10:00 - A: later\n\
         01.01.2024, 10:00 - A: earlier",
    );
    assert_eq!(t.len(), 2);
    assert!(t.messages[0].timestamp > t.messages[1].timestamp);
}

#[test]
fn four_digit_years_pass_through() {
    let t = parse("01.01.1999, 10:00 - A: y2k soon");
    assert_eq!(
        t.messages[0].timestamp,
        Some(Utc.with_ymd_and_hms(1999, 1, 1, 10, 0, 0).unwrap())
    );
}

// =========================================================================
// Filter and pagination boundaries
// =========================================================================

#[test]
fn filter_boundary_dates_inclusive() {
    let early = Message::user("A", "early")
        .with_timestamp(Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap());
    let late = Message::user("A", "late")
        .with_timestamp(Utc.with_ymd_and_hms(2024, 1, 15, 23, 59, 59).unwrap());
    let messages = vec![early, late];

    let config = FilterConfig::new()
        .with_date_from("2024-01-15")
        .unwrap()
        .with_date_to("2024-01-15")
        .unwrap();
    assert_eq!(apply_filters(&messages, &config).len(), 2);
}

#[test]
fn query_matches_across_continuation_lines() {
    let t = parse("01.01.2024, 12:34 - Alice: first\nsecond part here");
    let config = FilterConfig::new().with_query("second part");
    assert_eq!(apply_filters(t.messages(), &config).len(), 1);
}

#[test]
fn empty_query_matches_everything() {
    let t = parse("01.01.2024, 12:34 - Alice: hi");
    let config = FilterConfig::new().with_query("");
    assert_eq!(apply_filters(t.messages(), &config).len(), 1);
}

#[test]
fn paginate_single_item_pages() {
    let messages: Vec<Message> = (0..3).map(|i| Message::user("A", format!("{i}"))).collect();
    let refs: Vec<&Message> = messages.iter().collect();

    for n in 1..=3 {
        let page = paginate(&refs, n, 1);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.number, n);
        assert_eq!(page.total_pages, 3);
    }
}

#[test]
fn page_zero_clamps_to_first() {
    let messages = vec![Message::user("A", "x"), Message::user("A", "y")];
    let refs: Vec<&Message> = messages.iter().collect();
    let page = paginate(&refs, 0, 1);
    assert_eq!(page.number, 1);
}
