//! Raw transcript loading.
//!
//! Reads export files from disk and decodes them to Unicode, and knows the
//! on-disk layout of a WhatsApp folder export: one `*_chat.txt` transcript
//! next to the media files it references.
//!
//! Decoding tries UTF-8 first (a leading BOM is tolerated), then UTF-16
//! little/big endian when the byte stream starts with a UTF-16 BOM. A byte
//! stream none of these can decode is a fatal
//! [`ChatlensError::Encoding`](crate::error::ChatlensError), the only
//! whole-file failure the parsing pipeline can produce.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ChatlensError, Result};

/// Folder name prefix WhatsApp uses for chat exports.
const EXPORT_FOLDER_PREFIX: &str = "WhatsApp Chat - ";

/// Decodes raw transcript bytes to a `String`.
///
/// # Errors
///
/// Returns [`ChatlensError::Encoding`] when the bytes are neither valid
/// UTF-8 nor BOM-marked UTF-16.
pub fn decode_transcript(bytes: &[u8]) -> Result<String> {
    // UTF-16 BOMs first; a UTF-16 file is never valid UTF-8.
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return decode_utf16(&bytes[2..], u16::from_le_bytes);
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return decode_utf16(&bytes[2..], u16::from_be_bytes);
    }

    let without_bom = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
    match std::str::from_utf8(without_bom) {
        Ok(text) => Ok(text.to_string()),
        Err(e) => Err(ChatlensError::encoding(format!(
            "invalid UTF-8 at byte {} and no UTF-16 byte-order mark",
            e.valid_up_to()
        ))),
    }
}

fn decode_utf16(bytes: &[u8], read: fn([u8; 2]) -> u16) -> Result<String> {
    if bytes.len() % 2 != 0 {
        return Err(ChatlensError::encoding(
            "UTF-16 stream with odd byte length",
        ));
    }
    let units: Vec<u16> = bytes.chunks_exact(2).map(|c| read([c[0], c[1]])).collect();
    String::from_utf16(&units)
        .map_err(|_| ChatlensError::encoding("invalid UTF-16 code unit sequence"))
}

/// Reads and decodes a transcript file.
pub fn load_transcript(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    decode_transcript(&bytes).map_err(|e| match e {
        ChatlensError::Encoding { reason, .. } => ChatlensError::encoding_at(reason, path),
        other => other,
    })
}

/// Locates the transcript inside an export folder.
///
/// Prefers a `*_chat.txt` (the name WhatsApp writes); falls back to the
/// folder's only `.txt` file when the export was renamed.
///
/// # Errors
///
/// Returns [`ChatlensError::NoTranscript`] when neither rule finds a file.
pub fn find_chat_file(dir: &Path) -> Result<PathBuf> {
    let mut txt_files: Vec<PathBuf> = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.ends_with("_chat.txt") {
            return Ok(path);
        }
        if name.ends_with(".txt") {
            txt_files.push(path);
        }
    }

    if let [only] = txt_files.as_slice() {
        return Ok(only.clone());
    }
    Err(ChatlensError::no_transcript(dir))
}

/// Lists sibling files of the transcript, the export's media payload.
///
/// Returns bare file names, sorted; `.txt` files are excluded.
pub fn list_media_files(dir: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !name.ends_with(".txt") {
            files.push(name.to_string());
        }
    }
    files.sort_unstable();
    Ok(files)
}

/// Finds WhatsApp export folders under `dir` (e.g. a Downloads directory).
///
/// Best-effort: an unreadable directory yields an empty list rather than an
/// error, since this feeds a "did you mean" suggestion, not the pipeline.
pub fn discover_chat_folders(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut folders: Vec<PathBuf> = entries
        .filter_map(std::result::Result::ok)
        .map(|e| e.path())
        .filter(|p| {
            p.is_dir()
                && p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(EXPORT_FOLDER_PREFIX))
        })
        .collect();
    folders.sort_unstable();
    folders
}
