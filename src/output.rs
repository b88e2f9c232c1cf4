//! Output formats and writers.
//!
//! Parsed (and usually filtered) messages can be exported as
//! semicolon-delimited CSV, a JSON array, or JSON Lines. String converters
//! (`to_*`) and file writers (`write_*`) exist for each format; the
//! [`write_to_format`] dispatcher picks one from an [`OutputFormat`] value.
//!
//! CSV columns are chosen by [`OutputConfig`]; the JSON formats serialize
//! [`Message`] directly, so they always carry every populated field.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::message::Message;

/// Output format for exported message sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// CSV with semicolon delimiter (default).
    #[default]
    Csv,

    /// JSON array of messages.
    Json,

    /// JSON Lines, one JSON object per line. Also known as NDJSON.
    Jsonl,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["csv", "json", "jsonl", "ndjson"]
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

/// Chooses which optional CSV columns are emitted.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Prepend a `Timestamp` column (`YYYY-MM-DD HH:MM:SS`).
    pub include_timestamps: bool,
    /// Append an `Attachments` column (comma-joined file names).
    pub include_attachments: bool,
}

impl OutputConfig {
    /// Creates a configuration with all optional columns disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables the timestamp column.
    #[must_use]
    pub fn with_timestamps(mut self) -> Self {
        self.include_timestamps = true;
        self
    }

    /// Enables the attachments column.
    #[must_use]
    pub fn with_attachments(mut self) -> Self {
        self.include_attachments = true;
        self
    }
}

// ============================================================================
// CSV
// ============================================================================

/// Converts messages to a semicolon-delimited CSV string.
///
/// System messages appear with an empty `Sender` column.
#[cfg(feature = "csv-output")]
pub fn to_csv<'a>(
    messages: impl IntoIterator<Item = &'a Message>,
    config: &OutputConfig,
) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(Vec::new());

    let mut header: Vec<&str> = Vec::new();
    if config.include_timestamps {
        header.push("Timestamp");
    }
    header.push("Sender");
    header.push("Body");
    if config.include_attachments {
        header.push("Attachments");
    }
    writer.write_record(&header)?;

    for msg in messages {
        let mut record: Vec<String> = Vec::new();
        if config.include_timestamps {
            record.push(
                msg.timestamp
                    .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_default(),
            );
        }
        record.push(msg.sender().unwrap_or_default().to_string());
        record.push(msg.body.clone());
        if config.include_attachments {
            let names: Vec<&str> = msg.attachments.iter().map(|a| a.file_name.as_str()).collect();
            record.push(names.join(","));
        }
        writer.write_record(&record)?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes).map_err(|e| {
        crate::error::ChatlensError::encoding(format!("CSV output was not UTF-8: {e}"))
    })
}

/// Writes messages to a CSV file.
#[cfg(feature = "csv-output")]
pub fn write_csv<'a>(
    messages: impl IntoIterator<Item = &'a Message>,
    path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<()> {
    let csv = to_csv(messages, config)?;
    fs::write(path, csv)?;
    Ok(())
}

// ============================================================================
// JSON / JSONL
// ============================================================================

/// Converts messages to a pretty-printed JSON array.
#[cfg(feature = "json-output")]
pub fn to_json<'a>(messages: impl IntoIterator<Item = &'a Message>) -> Result<String> {
    let collected: Vec<&Message> = messages.into_iter().collect();
    Ok(serde_json::to_string_pretty(&collected)?)
}

/// Writes messages to a JSON file.
#[cfg(feature = "json-output")]
pub fn write_json<'a>(
    messages: impl IntoIterator<Item = &'a Message>,
    path: impl AsRef<Path>,
) -> Result<()> {
    let json = to_json(messages)?;
    fs::write(path, json)?;
    Ok(())
}

/// Converts messages to JSON Lines (one object per line).
#[cfg(feature = "json-output")]
pub fn to_jsonl<'a>(messages: impl IntoIterator<Item = &'a Message>) -> Result<String> {
    let mut out = String::new();
    for msg in messages {
        out.push_str(&serde_json::to_string(msg)?);
        out.push('\n');
    }
    Ok(out)
}

/// Writes messages to a JSON Lines file.
#[cfg(feature = "json-output")]
pub fn write_jsonl<'a>(
    messages: impl IntoIterator<Item = &'a Message>,
    path: impl AsRef<Path>,
) -> Result<()> {
    let jsonl = to_jsonl(messages)?;
    fs::write(path, jsonl)?;
    Ok(())
}

/// Writes messages in the requested format.
///
/// # Panics
///
/// Panics if the feature backing the requested format is not enabled.
pub fn write_to_format<'a>(
    messages: impl IntoIterator<Item = &'a Message>,
    path: impl AsRef<Path>,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<()> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => write_csv(messages, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => write_json(messages, path),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => write_jsonl(messages, path),
        #[allow(unreachable_patterns)]
        _ => panic!("Output format {format} requires the corresponding feature."),
    }
}
