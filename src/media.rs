//! Media classification and lookup.
//!
//! [`MediaKind`] maps file extensions to a coarse kind; [`MediaResolver`]
//! answers "does this attachment token exist in the export folder". Neither
//! ever inspects file contents: classification is by extension only, and
//! resolution is a path join plus an existence check.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Audio extensions seen in WhatsApp exports (voice notes are `.opus`).
const AUDIO_EXTENSIONS: &[&str] = &["opus", "mp3", "wav", "m4a", "ogg", "aac"];

/// Video extensions.
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "webm", "mkv", "3gp"];

/// Image extensions.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "heic"];

/// Coarse media classification derived from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Voice notes and music files.
    Audio,
    /// Video clips.
    Video,
    /// Photos, stickers, GIFs.
    Image,
    /// Documents, contacts, anything unrecognized.
    Other,
}

impl MediaKind {
    /// Classifies a filename by its extension (case-insensitive).
    ///
    /// Files without an extension, or with an unknown one, are [`Other`](MediaKind::Other).
    pub fn from_file_name(file_name: &str) -> Self {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some(e) if AUDIO_EXTENSIONS.contains(&e) => MediaKind::Audio,
            Some(e) if VIDEO_EXTENSIONS.contains(&e) => MediaKind::Video,
            Some(e) if IMAGE_EXTENSIONS.contains(&e) => MediaKind::Image,
            _ => MediaKind::Other,
        }
    }

    /// Returns `true` if the extension maps to a known media kind
    /// (anything but [`Other`](MediaKind::Other)).
    pub fn is_known_media(file_name: &str) -> bool {
        Self::from_file_name(file_name) != MediaKind::Other
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Audio => write!(f, "audio"),
            MediaKind::Video => write!(f, "video"),
            MediaKind::Image => write!(f, "image"),
            MediaKind::Other => write!(f, "other"),
        }
    }
}

/// Result of resolving an attachment token against the export folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedMedia {
    /// The file exists next to the transcript.
    Found {
        /// Absolute (or folder-relative) path to the media file.
        path: PathBuf,
        /// Kind derived from the extension.
        kind: MediaKind,
    },
    /// The token names a file that is not present in the folder.
    NotFound,
}

/// Locates attachment files relative to the transcript's directory.
///
/// The resolver is the sole point of filesystem contact for attachment
/// lookup; the parser itself never touches the disk. An unresolved token is
/// not an error; exports are routinely shared without their media folder.
#[derive(Debug, Clone)]
pub struct MediaResolver {
    base_dir: PathBuf,
}

impl MediaResolver {
    /// Creates a resolver rooted at the transcript's containing directory.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Returns the directory attachments are resolved against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolves an attachment token to an on-disk file.
    ///
    /// Tokens containing path separators are rejected as `NotFound`;
    /// exports only ever reference sibling files by bare name.
    pub fn resolve(&self, token: &str) -> ResolvedMedia {
        let token = token.trim();
        if token.is_empty() || token.contains('/') || token.contains('\\') {
            return ResolvedMedia::NotFound;
        }

        let path = self.base_dir.join(token);
        if path.is_file() {
            ResolvedMedia::Found {
                kind: MediaKind::from_file_name(token),
                path,
            }
        } else {
            ResolvedMedia::NotFound
        }
    }
}
