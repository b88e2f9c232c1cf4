//! Session state for one opened chat export.
//!
//! A [`ChatSession`] is created when a folder is selected, owns the parsed
//! dataset for as long as that selection lasts, and is replaced wholesale
//! (not merged) when another folder is opened. There is no ambient or
//! cached state anywhere else in the crate.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::loader;
use crate::media::MediaResolver;
use crate::message::Message;
use crate::parser::{Transcript, TranscriptParser};

/// An opened chat export: the canonical parsed dataset plus the media
/// lookup for its folder.
#[derive(Debug)]
pub struct ChatSession {
    folder: PathBuf,
    transcript_path: PathBuf,
    transcript: Transcript,
    media_files: Vec<String>,
    resolver: MediaResolver,
}

impl ChatSession {
    /// Opens an export folder: locates the transcript, loads and parses it,
    /// and lists the sibling media files.
    ///
    /// # Errors
    ///
    /// Fails when the folder has no usable transcript, cannot be read, or
    /// the transcript bytes cannot be decoded.
    pub fn open(folder: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with(folder, &TranscriptParser::new())
    }

    /// Opens an export folder with a caller-supplied parser (custom
    /// system-phrase configuration, for instance).
    pub fn open_with(folder: impl Into<PathBuf>, parser: &TranscriptParser) -> Result<Self> {
        let folder = folder.into();
        let transcript_path = loader::find_chat_file(&folder)?;
        let transcript = parser.parse_path(&transcript_path)?;
        let media_files = loader::list_media_files(&folder)?;

        Ok(Self {
            resolver: MediaResolver::new(&folder),
            folder,
            transcript_path,
            transcript,
            media_files,
        })
    }

    /// Opens a bare transcript file; media resolves against its parent
    /// directory.
    pub fn open_file(path: impl Into<PathBuf>) -> Result<Self> {
        let transcript_path = path.into();
        let folder = transcript_path
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

        let parser = TranscriptParser::new();
        let transcript = parser.parse_path(&transcript_path)?;
        let media_files = loader::list_media_files(&folder).unwrap_or_default();

        Ok(Self {
            resolver: MediaResolver::new(&folder),
            folder,
            transcript_path,
            transcript,
            media_files,
        })
    }

    /// The export folder this session was opened on.
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Path of the transcript file inside the folder.
    pub fn transcript_path(&self) -> &Path {
        &self.transcript_path
    }

    /// The parsed dataset, read-only.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// The parsed messages, read-only.
    pub fn messages(&self) -> &[Message] {
        self.transcript.messages()
    }

    /// Bare names of the media files shipped with the export.
    pub fn media_files(&self) -> &[String] {
        &self.media_files
    }

    /// Resolver for attachment tokens, rooted at this folder.
    pub fn media_resolver(&self) -> &MediaResolver {
        &self.resolver
    }

    /// Human-readable chat name derived from the folder name.
    ///
    /// Strips the `WhatsApp Chat - ` prefix and a trailing `[1]` duplicate
    /// marker, as the exports name them.
    pub fn title(&self) -> String {
        let raw = self
            .folder
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("Chat");

        let name = raw.strip_prefix("WhatsApp Chat - ").unwrap_or(raw);
        let name = name.strip_suffix("[1]").unwrap_or(name);
        name.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fixture_folder(name: &str) -> tempfile::TempDir {
        let dir = tempfile::Builder::new().prefix(name).tempdir().unwrap();
        fs::write(
            dir.path().join("_chat.txt"),
            "01.01.2024, 12:34 - Alice: hello\n01.01.2024, 12:35 - Bob: PTT-01.opus (file attached)\n",
        )
        .unwrap();
        fs::write(dir.path().join("PTT-01.opus"), b"audio").unwrap();
        dir
    }

    #[test]
    fn open_parses_and_lists_media() {
        let dir = fixture_folder("chat");
        let session = ChatSession::open(dir.path()).unwrap();

        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.media_files(), ["PTT-01.opus"]);
        assert!(session.transcript_path().ends_with("_chat.txt"));
    }

    #[test]
    fn resolver_is_rooted_at_folder() {
        use crate::media::ResolvedMedia;

        let dir = fixture_folder("chat");
        let session = ChatSession::open(dir.path()).unwrap();

        assert!(matches!(
            session.media_resolver().resolve("PTT-01.opus"),
            ResolvedMedia::Found { .. }
        ));
        assert_eq!(
            session.media_resolver().resolve("missing.jpg"),
            ResolvedMedia::NotFound
        );
    }

    #[test]
    fn reopen_replaces_dataset() {
        let first = fixture_folder("first");
        let second = tempfile::tempdir().unwrap();
        fs::write(
            second.path().join("_chat.txt"),
            "02.02.2024, 09:00 - Carol: only one message\n",
        )
        .unwrap();

        let session = ChatSession::open(first.path()).unwrap();
        assert_eq!(session.messages().len(), 2);

        // Re-selection produces a fresh session; the old value is simply
        // dropped by the caller.
        let session = ChatSession::open(second.path()).unwrap();
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].sender(), Some("Carol"));
    }

    #[test]
    fn open_missing_folder_fails() {
        assert!(ChatSession::open("/no/such/folder").is_err());
    }

    #[test]
    fn open_file_uses_parent_for_media() {
        let dir = fixture_folder("chat");
        let session = ChatSession::open_file(dir.path().join("_chat.txt")).unwrap();
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.media_files(), ["PTT-01.opus"]);
    }

    #[test]
    fn title_strips_export_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("WhatsApp Chat - Samat[1]");
        fs::create_dir(&folder).unwrap();
        fs::write(folder.join("_chat.txt"), "01.01.2024, 12:34 - A: x\n").unwrap();

        let session = ChatSession::open(&folder).unwrap();
        assert_eq!(session.title(), "Samat");
    }
}
