//! # Chatlens
//!
//! A Rust library for loading, parsing and exploring exported WhatsApp
//! chats: the plain-text transcript plus its folder of media files.
//!
//! ## Overview
//!
//! The heart of the crate is the [`parser`]: a line-oriented state machine
//! that recognizes the incompatible timestamp dialects WhatsApp exports use,
//! merges physical lines into logical multi-line messages, tells system
//! notices from user messages, and extracts attachment references, all
//! tolerantly, so a malformed line can never take down the parse.
//!
//! Around it sit small collaborators: the [`loader`] (decoding and folder
//! layout), the [`media`] resolver (attachment lookup by extension), the
//! [`filter`] and [`stats`] layers that query the parsed dataset, and the
//! [`output`] writers.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatlens::prelude::*;
//!
//! fn main() -> Result<()> {
//!     // Open an export folder: parses `_chat.txt`, lists the media files.
//!     let session = ChatSession::open("WhatsApp Chat - Samat")?;
//!
//!     // Query the dataset.
//!     let config = FilterConfig::new().with_query("invoice");
//!     let hits = apply_filters(session.messages(), &config);
//!
//!     // Aggregate activity statistics.
//!     let stats = ChatStats::collect(hits.iter().copied());
//!     println!("{} matching messages", stats.total_messages);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Parsing without a filesystem
//!
//! The parser itself is a pure function over text:
//!
//! ```rust
//! use chatlens::parser::TranscriptParser;
//!
//! let transcript = TranscriptParser::new()
//!     .parse_str("01.01.2024, 12:34 - Alice: Hello");
//! assert_eq!(transcript.len(), 1);
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] — the transcript parser ([`TranscriptParser`](parser::TranscriptParser), [`Transcript`](parser::Transcript))
//! - [`dialect`] — header-line dialect descriptors and timestamp parsing
//! - [`message`] — [`Message`], [`AttachmentRef`](message::AttachmentRef), [`LineSpan`](message::LineSpan)
//! - [`config`] — [`ParserConfig`](config::ParserConfig) (extensible system-phrase list)
//! - [`loader`] — transcript decoding and export-folder layout
//! - [`media`] — [`MediaKind`](media::MediaKind) and [`MediaResolver`](media::MediaResolver)
//! - [`session`] — [`ChatSession`](session::ChatSession), the per-selection dataset owner
//! - [`filter`] — [`FilterConfig`](filter::FilterConfig), [`apply_filters`](filter::apply_filters), [`paginate`](filter::paginate)
//! - [`stats`] — [`ChatStats`](stats::ChatStats) (daily series, weekday×hour grid)
//! - [`output`] — CSV/JSON/JSONL writers
//! - [`error`] — [`ChatlensError`], [`Result`]
//! - [`cli`] — CLI argument types (behind the `cli` feature)

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod dialect;
pub mod error;
pub mod filter;
pub mod loader;
pub mod media;
pub mod message;
pub mod output;
pub mod parser;
pub mod session;
pub mod stats;

// Re-export the main types at the crate root for convenience
pub use error::{ChatlensError, Result};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use chatlens::prelude::*;
/// ```
pub mod prelude {
    // Core message types
    pub use crate::message::{AttachmentRef, LineSpan, Message};

    // Error types
    pub use crate::error::{ChatlensError, Result};

    // Parser
    pub use crate::config::ParserConfig;
    pub use crate::parser::{ParseDiagnostics, Transcript, TranscriptParser};

    // Session and media
    pub use crate::media::{MediaKind, MediaResolver, ResolvedMedia};
    pub use crate::session::ChatSession;

    // Querying
    pub use crate::filter::{FilterConfig, Page, apply_filters, paginate};
    pub use crate::stats::ChatStats;

    // Output
    pub use crate::output::{OutputConfig, OutputFormat, write_to_format};
}
