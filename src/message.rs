//! Parsed message types.
//!
//! This module provides [`Message`], the atomic unit produced by the
//! transcript parser, together with [`AttachmentRef`] and [`LineSpan`].
//!
//! A message is either a *user* message (it has a sender) or a *system*
//! message (join/leave/call/encryption notices, no sender), never both.
//! The [`Message::user`] and [`Message::system`] constructors are the only
//! ways to build one, so the invariant holds by construction.
//!
//! # Examples
//!
//! ```
//! use chatlens::message::Message;
//!
//! let msg = Message::user("Alice", "Hello, world!");
//! assert_eq!(msg.sender(), Some("Alice"));
//! assert!(!msg.is_system);
//!
//! let notice = Message::system("Messages and calls are end-to-end encrypted.");
//! assert!(notice.is_system);
//! assert_eq!(notice.sender(), None);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::media::MediaKind;

/// The contiguous range of physical input lines a message was assembled
/// from, as 0-based indices. `start == end` for single-line messages.
///
/// Kept for diagnostics and round-trip verification; it never influences
/// parsing decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LineSpan {
    /// Index of the first physical line (the header line).
    pub start: usize,
    /// Index of the last physical line, inclusive.
    pub end: usize,
}

impl LineSpan {
    /// Creates a span covering a single physical line.
    pub fn single(line: usize) -> Self {
        Self {
            start: line,
            end: line,
        }
    }

    /// Number of physical lines covered.
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// A span always covers at least one line.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// A reference to a media file mentioned in a message body.
///
/// The token is extracted from attachment markers like
/// `<attached: IMG_001.jpg>` or `IMG_001.jpg (file attached)`; the kind is
/// derived purely from the file extension. Whether the file actually exists
/// on disk is the [`MediaResolver`](crate::media::MediaResolver)'s business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRef {
    /// The referenced filename, including extension.
    pub file_name: String,
    /// Media kind derived from the extension.
    pub kind: MediaKind,
}

impl AttachmentRef {
    /// Creates an attachment reference, classifying the filename by extension.
    pub fn new(file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let kind = MediaKind::from_file_name(&file_name);
        Self { file_name, kind }
    }
}

/// A single logical message reconstructed from the transcript.
///
/// Produced once per parse and immutable thereafter; the parsed sequence is
/// the canonical dataset that filtering, pagination and statistics consume
/// without mutating.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `timestamp` | `Option<DateTime<Utc>>` | Header timestamp; `None` only for degraded input |
/// | `sender` | `Option<String>` | Author name; `None` for system messages |
/// | `body` | `String` | Logical text, internal newlines preserved |
/// | `is_system` | `bool` | Join/leave/call/encryption style notice |
/// | `attachments` | `Vec<AttachmentRef>` | Media tokens found in the body, in order |
/// | `line_span` | `LineSpan` | Physical lines this message covers |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// When the message was sent, as written in the export.
    ///
    /// Exports carry no timezone; the naive timestamp is interpreted as UTC.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,

    /// Display name of the author. `None` exactly when `is_system` is true.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub sender: Option<String>,

    /// Logical message text.
    ///
    /// May contain newlines when the export spread a message over several
    /// physical lines. Attachment markers are left in place.
    pub body: String,

    /// `true` for transcript entries that carry no human sender.
    #[serde(default)]
    pub is_system: bool,

    /// Media references found in the body, in order of discovery.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<AttachmentRef>,

    /// The physical lines this message was assembled from.
    #[serde(default)]
    pub line_span: LineSpan,
}

impl Message {
    /// Creates a regular user message.
    pub fn user(sender: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            timestamp: None,
            sender: Some(sender.into()),
            body: body.into(),
            is_system: false,
            attachments: Vec::new(),
            line_span: LineSpan::default(),
        }
    }

    /// Creates a system message (no sender).
    pub fn system(body: impl Into<String>) -> Self {
        Self {
            timestamp: None,
            sender: None,
            body: body.into(),
            is_system: true,
            attachments: Vec::new(),
            line_span: LineSpan::default(),
        }
    }

    /// Builder method to set the timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, ts: DateTime<Utc>) -> Self {
        self.timestamp = Some(ts);
        self
    }

    /// Builder method to set the physical line span.
    #[must_use]
    pub fn with_span(mut self, span: LineSpan) -> Self {
        self.line_span = span;
        self
    }

    /// Builder method to set the attachment list.
    #[must_use]
    pub fn with_attachments(mut self, attachments: Vec<AttachmentRef>) -> Self {
        self.attachments = attachments;
        self
    }

    /// Returns the sender name, if this is a user message.
    pub fn sender(&self) -> Option<&str> {
        self.sender.as_deref()
    }

    /// Returns the message body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the timestamp, if one was parsed.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    /// Returns `true` if any attachment token was found in the body.
    pub fn has_attachments(&self) -> bool {
        !self.attachments.is_empty()
    }

    /// Returns `true` if the body is empty or whitespace-only.
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn user_message_has_sender() {
        let msg = Message::user("Alice", "Hello");
        assert_eq!(msg.sender(), Some("Alice"));
        assert_eq!(msg.body(), "Hello");
        assert!(!msg.is_system);
        assert!(msg.timestamp().is_none());
    }

    #[test]
    fn system_message_has_no_sender() {
        let msg = Message::system("Alice left");
        assert_eq!(msg.sender(), None);
        assert!(msg.is_system);
    }

    #[test]
    fn sender_xor_system_holds_by_construction() {
        let user = Message::user("Bob", "hi");
        assert!(user.sender.is_some() != user.is_system);

        let system = Message::system("security code changed");
        assert!(system.sender.is_some() != system.is_system);
    }

    #[test]
    fn builder_methods() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 12, 34, 0).unwrap();
        let msg = Message::user("Alice", "see file")
            .with_timestamp(ts)
            .with_span(LineSpan { start: 3, end: 5 })
            .with_attachments(vec![AttachmentRef::new("IMG_001.jpg")]);

        assert_eq!(msg.timestamp(), Some(ts));
        assert_eq!(msg.line_span.len(), 3);
        assert!(msg.has_attachments());
        assert_eq!(msg.attachments[0].kind, MediaKind::Image);
    }

    #[test]
    fn attachment_ref_classifies_by_extension() {
        assert_eq!(AttachmentRef::new("voice.opus").kind, MediaKind::Audio);
        assert_eq!(AttachmentRef::new("clip.mp4").kind, MediaKind::Video);
        assert_eq!(AttachmentRef::new("photo.jpeg").kind, MediaKind::Image);
        assert_eq!(AttachmentRef::new("notes.pdf").kind, MediaKind::Other);
    }

    #[test]
    fn line_span_len() {
        assert_eq!(LineSpan::single(7).len(), 1);
        assert_eq!(LineSpan { start: 2, end: 6 }.len(), 5);
    }

    #[test]
    fn serialization_skips_empty_fields() {
        let msg = Message::system("call missed");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(!json.contains("sender"));
        assert!(!json.contains("timestamp"));
        assert!(!json.contains("attachments"));
    }

    #[test]
    fn serde_roundtrip() {
        let ts = Utc.with_ymd_and_hms(2025, 1, 10, 11, 58, 38).unwrap();
        let msg = Message::user("Gulmira", "photo incoming")
            .with_timestamp(ts)
            .with_attachments(vec![AttachmentRef::new("IMG_204.jpg")]);

        let json = serde_json::to_string(&msg).unwrap();
        let parsed: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(msg, parsed);
    }
}
