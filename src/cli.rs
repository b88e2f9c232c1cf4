//! Command-line interface definition using clap.
//!
//! This module defines [`Args`] plus the CLI-facing [`OutputFormat`]
//! wrapper (the library's format enum, with clap's `ValueEnum` bolted on).

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Explore an exported WhatsApp chat: parse the transcript, filter and
/// search messages, show activity statistics, export the result.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatlens")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatlens \"WhatsApp Chat - Samat\"
    chatlens _chat.txt --stats
    chatlens export/ --from Alice --after 2024-01-01
    chatlens export/ --query \"invoice\" -o hits.csv
    chatlens export/ -o chat.jsonl --format jsonl --include-system")]
pub struct Args {
    /// Export folder (or a bare transcript .txt file)
    pub input: PathBuf,

    /// Write the filtered messages to this file instead of the terminal
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format (used with --output)
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Keep messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Keep messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Keep messages from this sender only
    #[arg(long, value_name = "USER")]
    pub from: Option<String>,

    /// Keep messages containing this text (case-insensitive)
    #[arg(short, long, value_name = "TEXT")]
    pub query: Option<String>,

    /// Include system messages (joins, calls, encryption notices)
    #[arg(long)]
    pub include_system: bool,

    /// Print activity statistics
    #[arg(long)]
    pub stats: bool,

    /// Page to display (defaults to the newest page)
    #[arg(long, value_name = "N")]
    pub page: Option<usize>,

    /// Messages per page when printing to the terminal (0 = all)
    #[arg(long, value_name = "N", default_value_t = 100)]
    pub per_page: usize,

    /// Include timestamps in CSV output
    #[arg(short = 't', long)]
    pub timestamps: bool,

    /// Include an attachments column in CSV output
    #[arg(short = 'a', long)]
    pub attachments: bool,
}

/// Output format options for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default)]
pub enum OutputFormat {
    /// CSV with semicolon delimiter (default)
    #[default]
    Csv,

    /// JSON array of messages
    Json,

    /// JSON Lines - one JSON object per line
    Jsonl,
}

impl From<OutputFormat> for crate::output::OutputFormat {
    fn from(format: OutputFormat) -> crate::output::OutputFormat {
        match format {
            OutputFormat::Csv => crate::output::OutputFormat::Csv,
            OutputFormat::Json => crate::output::OutputFormat::Json,
            OutputFormat::Jsonl => crate::output::OutputFormat::Jsonl,
        }
    }
}
