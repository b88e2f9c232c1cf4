//! Unified error types for chatlens.
//!
//! A single [`ChatlensError`] enum covers all failure cases in the library,
//! with a crate-wide [`Result`] alias.
//!
//! # Error Handling Philosophy
//!
//! Per-line parse problems are never errors: the transcript parser absorbs
//! them (a malformed line degrades to continuation text and is counted in
//! the parse diagnostics). Only whole-file conditions surface here:
//! unreadable paths, undecodable byte streams, missing transcripts.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatlens operations.
pub type Result<T> = std::result::Result<T, ChatlensError>;

/// The error type for all chatlens operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatlensError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The transcript file or folder doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The transcript bytes could not be decoded under any attempted
    /// charset (UTF-8, then BOM-indicated UTF-16).
    ///
    /// Fatal for the parse invocation; there is no partial result.
    #[error("Cannot decode transcript{}: {reason}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Encoding {
        /// What went wrong with the byte stream.
        reason: String,
        /// The file path, if the bytes came from disk.
        path: Option<PathBuf>,
    },

    /// No transcript file was found in the selected folder.
    ///
    /// Exports contain a `*_chat.txt`; a folder with no `.txt` file at all
    /// (or several unrelated ones) cannot be opened as a chat.
    #[error("No chat transcript found in {}", dir.display())]
    NoTranscript {
        /// The folder that was searched.
        dir: PathBuf,
    },

    /// Invalid date in filter configuration.
    ///
    /// Date filters expect YYYY-MM-DD format.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided.
        input: String,
        /// Expected format description.
        expected: &'static str,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatlensError {
    /// Creates an encoding error for a byte stream of unknown origin.
    pub fn encoding(reason: impl Into<String>) -> Self {
        ChatlensError::Encoding {
            reason: reason.into(),
            path: None,
        }
    }

    /// Creates an encoding error tied to a file path.
    pub fn encoding_at(reason: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        ChatlensError::Encoding {
            reason: reason.into(),
            path: Some(path.into()),
        }
    }

    /// Creates a missing-transcript error.
    pub fn no_transcript(dir: impl Into<PathBuf>) -> Self {
        ChatlensError::NoTranscript { dir: dir.into() }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatlensError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatlensError::Io(_))
    }

    /// Returns `true` if this is an encoding error.
    pub fn is_encoding(&self) -> bool {
        matches!(self, ChatlensError::Encoding { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatlensError::InvalidDate { .. })
    }
}
