//! The transcript parser.
//!
//! A line-oriented state machine turning the decoded text of a WhatsApp
//! export into an ordered sequence of [`Message`]s. Every physical line is
//! accounted for: it either opens a new message (its header matches one of
//! the [`Dialect`](crate::dialect::Dialect) patterns, tried in fixed
//! priority order) or is folded into the body of the message above it.
//!
//! The parser is total: [`TranscriptParser::parse_str`] cannot fail, no
//! matter how corrupted the input. Malformed lines degrade (a header whose
//! timestamp does not survive numeric validation becomes a continuation, a
//! continuation with nothing above it is discarded) and every degradation
//! is counted in [`ParseDiagnostics`]. Only undecodable bytes abort a parse,
//! and that happens in the [loader](crate::loader) before the parser runs.
//!
//! # Example
//!
//! ```
//! use chatlens::parser::TranscriptParser;
//!
//! let text = "01.01.2024, 12:34 - Alice: Hello\nstill hello\n";
//! let transcript = TranscriptParser::new().parse_str(text);
//!
//! assert_eq!(transcript.len(), 1);
//! assert_eq!(transcript.messages[0].body, "Hello\nstill hello");
//! ```

use std::path::Path;

use regex::{Regex, RegexSet};

use crate::config::ParserConfig;
use crate::dialect::{self, HeaderScanner, RawHeader};
use crate::error::Result;
use crate::loader;
use crate::media::MediaKind;
use crate::message::{AttachmentRef, LineSpan, Message};

/// Counters for lines that needed tolerant handling.
///
/// Purely advisory: none of these indicate failure, they describe how much
/// of the input deviated from the one-header-per-line ideal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseDiagnostics {
    /// Lines folded into the previous message's body.
    pub continuation_lines: usize,
    /// Continuation lines before the first header; discarded.
    pub orphan_lines: usize,
    /// Header-shaped lines whose date or time failed validation and were
    /// downgraded to continuations.
    pub bad_timestamps: usize,
}

/// The result of one parser invocation: the ordered message sequence plus
/// diagnostics. Immutable once produced.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    /// Messages in input order; never reordered or deduplicated.
    pub messages: Vec<Message>,
    /// Tolerant-handling counters for this parse.
    pub diagnostics: ParseDiagnostics,
}

impl Transcript {
    /// Number of parsed messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if no message was parsed.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns the messages as a read-only slice.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Distinct sender names, sorted.
    pub fn participants(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.messages.iter().filter_map(Message::sender).collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

/// An in-progress message during the scan; finalized when the next header
/// opens or the input ends.
struct OpenMessage {
    timestamp: Option<chrono::DateTime<chrono::Utc>>,
    sender: Option<String>,
    body: String,
    is_system: bool,
    span: LineSpan,
}

/// Accumulator carried through the line fold.
#[derive(Default)]
struct Accumulator {
    finished: Vec<Message>,
    open: Option<OpenMessage>,
    diagnostics: ParseDiagnostics,
}

/// Parser for WhatsApp TXT transcripts.
///
/// Stateless across invocations: all accumulation is local to one
/// [`parse_str`](Self::parse_str) call, so a single parser may be shared
/// and invoked concurrently on independent inputs.
pub struct TranscriptParser {
    config: ParserConfig,
    scanner: HeaderScanner,
    system_phrases: RegexSet,
    attached_marker: Regex,
    file_attached: Regex,
}

impl TranscriptParser {
    /// Creates a parser with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Creates a parser with a custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        // Phrase entries are regex fragments; an entry that fails to compile
        // on its own is demoted to a literal so one bad pattern cannot
        // disable classification.
        let sanitized: Vec<String> = config
            .system_phrases
            .iter()
            .map(|p| {
                let pattern = format!("(?i){p}");
                if Regex::new(&pattern).is_ok() {
                    pattern
                } else {
                    format!("(?i){}", regex::escape(p))
                }
            })
            .collect();

        Self {
            scanner: HeaderScanner::new(),
            system_phrases: RegexSet::new(&sanitized).unwrap(),
            attached_marker: Regex::new(r"(?i)<attached:\s*([^>]+)>").unwrap(),
            file_attached: Regex::new(r"(?i)([^\s:<>]+\.[A-Za-z0-9]{1,5})\s*\(file attached\)")
                .unwrap(),
            config,
        }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses the full decoded text of a transcript.
    ///
    /// Total over all string inputs: empty files, headerless noise and
    /// truncated exports all yield a (possibly empty) [`Transcript`].
    pub fn parse_str(&self, text: &str) -> Transcript {
        let acc = text
            .lines()
            .enumerate()
            .fold(Accumulator::default(), |acc, (idx, line)| {
                self.step(acc, idx, line)
            });
        self.finish(acc)
    }

    /// Reads, decodes and parses a transcript file.
    ///
    /// # Errors
    ///
    /// Fails only on whole-file conditions: unreadable path or a byte
    /// stream no attempted encoding can decode.
    pub fn parse_path(&self, path: &Path) -> Result<Transcript> {
        let text = loader::load_transcript(path)?;
        Ok(self.parse_str(&text))
    }

    /// Processes one physical line.
    fn step(&self, mut acc: Accumulator, idx: usize, raw: &str) -> Accumulator {
        let line = raw.trim_matches(|c| c == '\u{FEFF}' || c == '\r' || c == ' ');

        if let Some(header) = self.scanner.scan(line) {
            match dialect::parse_timestamp(header.date, header.time) {
                Some(ts) => {
                    if let Some(open) = acc.open.take() {
                        acc.finished.push(self.finalize(open));
                    }
                    let mut open = self.open_message(&header, idx);
                    open.timestamp = Some(ts);
                    acc.open = Some(open);
                    return acc;
                }
                None => {
                    // Header shape with an impossible date; one bad header
                    // must not corrupt the rest of the transcript.
                    acc.diagnostics.bad_timestamps += 1;
                }
            }
        }

        // Continuation: extend the open message, or discard when the input
        // starts mid-message (truncated export).
        match acc.open.as_mut() {
            Some(open) => {
                open.body.push('\n');
                open.body.push_str(line);
                open.span.end = idx;
                acc.diagnostics.continuation_lines += 1;
            }
            None => acc.diagnostics.orphan_lines += 1,
        }
        acc
    }

    /// Classifies a matched header into an open user or system message.
    fn open_message(&self, header: &RawHeader<'_>, idx: usize) -> OpenMessage {
        let (sender, body, is_system) = match header.rest.split_once(": ") {
            Some((raw_sender, body)) => {
                let sender = dialect::clean_sender(raw_sender);
                if sender.is_empty() {
                    (None, header.rest, true)
                } else if self.config.detect_system_phrases && self.system_phrases.is_match(body) {
                    // Boilerplate notice that happens to carry a sender
                    // prefix in this export dialect.
                    (None, body, true)
                } else {
                    (Some(sender.to_string()), body, false)
                }
            }
            // Timestamp but no colon-delimited sender.
            None => (None, header.rest, true),
        };

        OpenMessage {
            timestamp: None,
            sender,
            body: body.to_string(),
            is_system,
            span: LineSpan::single(idx),
        }
    }

    /// Closes an open message: trims the body and extracts attachments.
    fn finalize(&self, open: OpenMessage) -> Message {
        let body = open.body.trim().to_string();
        let attachments = self.extract_attachments(&body);
        Message {
            timestamp: open.timestamp,
            sender: open.sender,
            body,
            is_system: open.is_system,
            attachments,
            line_span: open.span,
        }
    }

    fn finish(&self, mut acc: Accumulator) -> Transcript {
        if let Some(open) = acc.open.take() {
            acc.finished.push(self.finalize(open));
        }
        Transcript {
            messages: acc.finished,
            diagnostics: acc.diagnostics,
        }
    }

    /// Scans a finalized body for attachment tokens, in order of discovery.
    ///
    /// The marker text is left in the body; rendering decides whether to
    /// hide it.
    fn extract_attachments(&self, body: &str) -> Vec<AttachmentRef> {
        let mut found: Vec<(usize, AttachmentRef)> = Vec::new();

        for caps in self.attached_marker.captures_iter(body) {
            if let (Some(m), Some(name)) = (caps.get(0), caps.get(1)) {
                found.push((m.start(), AttachmentRef::new(name.as_str().trim())));
            }
        }
        for caps in self.file_attached.captures_iter(body) {
            if let (Some(m), Some(name)) = (caps.get(0), caps.get(1)) {
                found.push((m.start(), AttachmentRef::new(name.as_str().trim())));
            }
        }

        if found.is_empty() {
            // A bare filename standing as the whole body also counts.
            let token = body.trim();
            if !token.is_empty()
                && !token.contains(char::is_whitespace)
                && MediaKind::is_known_media(token)
            {
                found.push((0, AttachmentRef::new(token)));
            }
        }

        found.sort_by_key(|(pos, _)| *pos);
        found.into_iter().map(|(_, a)| a).collect()
    }
}

impl Default for TranscriptParser {
    fn default() -> Self {
        Self::new()
    }
}
