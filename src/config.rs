//! Parser configuration.
//!
//! [`ParserConfig`] controls the tolerant parts of transcript parsing,
//! most importantly the system-phrase list, which is data rather than code:
//! export phrasing shifts between app versions and locales, so callers can
//! extend or replace the defaults without touching the parser.
//!
//! # Example
//!
//! ```rust
//! use chatlens::config::ParserConfig;
//!
//! let config = ParserConfig::new()
//!     .with_system_phrase(r"pinned a message");
//! ```

use serde::{Deserialize, Serialize};

/// Default system-phrase patterns.
///
/// Entries are regex fragments matched case-insensitively anywhere in a
/// message body, so surrounding punctuation and small wording shifts don't
/// defeat them. Only full phrases are listed; single words like "added" or
/// "left" also occur in ordinary prose.
const DEFAULT_SYSTEM_PHRASES: &[&str] = &[
    r"end-to-end encrypted",
    r"joined using .{0,40}invite link",
    r"changed the subject",
    r"changed this group's icon",
    r"changed the group description",
    r"changed their phone number",
    r"security code .{0,20}changed",
    r"missed (a )?voice call",
    r"missed (a )?video call",
    r"created (the |this )?group",
    r"turned (on|off) disappearing messages",
];

/// Configuration for [`TranscriptParser`](crate::parser::TranscriptParser).
///
/// # Example
///
/// ```rust
/// use chatlens::config::ParserConfig;
///
/// let config = ParserConfig::new()
///     .with_detect_system_phrases(true)
///     .with_system_phrase("pinned a message");
/// assert!(config.detect_system_phrases);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Regex fragments identifying system notices in message bodies
    /// (matched case-insensitively, substring semantics).
    pub system_phrases: Vec<String>,

    /// Reclassify sender-carrying lines whose body matches a system phrase
    /// (default: true).
    pub detect_system_phrases: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            system_phrases: DEFAULT_SYSTEM_PHRASES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            detect_system_phrases: true,
        }
    }
}

impl ParserConfig {
    /// Creates a configuration with the default phrase list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one phrase pattern to the system-phrase list.
    #[must_use]
    pub fn with_system_phrase(mut self, phrase: impl Into<String>) -> Self {
        self.system_phrases.push(phrase.into());
        self
    }

    /// Replaces the system-phrase list entirely.
    #[must_use]
    pub fn with_system_phrases(mut self, phrases: Vec<String>) -> Self {
        self.system_phrases = phrases;
        self
    }

    /// Enables or disables body-based system classification.
    #[must_use]
    pub fn with_detect_system_phrases(mut self, detect: bool) -> Self {
        self.detect_system_phrases = detect;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_covers_common_notices() {
        let config = ParserConfig::default();
        assert!(config.detect_system_phrases);
        assert!(
            config
                .system_phrases
                .iter()
                .any(|p| p.contains("end-to-end encrypted"))
        );
        assert!(
            config
                .system_phrases
                .iter()
                .any(|p| p.contains("invite link"))
        );
        assert!(
            config
                .system_phrases
                .iter()
                .any(|p| p.contains("security code"))
        );
    }

    #[test]
    fn builder_extends_phrase_list() {
        let base_len = ParserConfig::default().system_phrases.len();
        let config = ParserConfig::new().with_system_phrase("pinned a message");
        assert_eq!(config.system_phrases.len(), base_len + 1);
    }

    #[test]
    fn builder_replaces_phrase_list() {
        let config = ParserConfig::new().with_system_phrases(vec!["only this".to_string()]);
        assert_eq!(config.system_phrases.len(), 1);
    }
}
