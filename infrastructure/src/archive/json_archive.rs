//! JSON file archive for chat sessions.
//!
//! One `<session-id>.json` document per session under a dedicated folder,
//! created lazily on the first save. Saves go through a temporary file and
//! an atomic rename so a crash mid-write never leaves a half-written record
//! behind for the next scan to choke on.

use curio_domain::{ArchiveError, ArchiveScan, ChatArchive, ChatSession, SessionId, SkippedEntry};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Directory-backed [`ChatArchive`] storing one JSON document per session.
pub struct JsonChatArchive {
    folder: PathBuf,
}

impl JsonChatArchive {
    /// Create an archive whose session files live in `root/<folder_name>`.
    /// Nothing is created on disk until the first save.
    pub fn new(root: impl AsRef<Path>, folder_name: &str) -> Self {
        Self {
            folder: root.as_ref().join(folder_name),
        }
    }

    /// The folder holding session files.
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    fn session_path(&self, id: SessionId) -> PathBuf {
        self.folder.join(format!("{id}.json"))
    }
}

impl ChatArchive for JsonChatArchive {
    fn save(&self, session: &ChatSession) -> Result<(), ArchiveError> {
        fs::create_dir_all(&self.folder)?;

        let json = serde_json::to_vec_pretty(session).map_err(ArchiveError::Encode)?;
        let path = self.session_path(session.id());
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, &json)?;
        fs::rename(&staging, &path)?;

        debug!("Saved session {} ({} bytes)", session.id(), json.len());
        Ok(())
    }

    fn load(&self, id: SessionId) -> Result<Option<ChatSession>, ArchiveError> {
        let data = match fs::read(self.session_path(id)) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let session = serde_json::from_slice(&data).map_err(ArchiveError::Decode)?;
        Ok(Some(session))
    }

    fn load_all(&self) -> Result<ArchiveScan, ArchiveError> {
        let mut scan = ArchiveScan::default();

        let entries = match fs::read_dir(&self.folder) {
            Ok(entries) => entries,
            // No folder yet means nothing was ever saved
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(scan),
            Err(e) => return Err(e.into()),
        };

        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            let outcome = fs::read(&path).map_err(|e| e.to_string()).and_then(|data| {
                serde_json::from_slice::<ChatSession>(&data).map_err(|e| e.to_string())
            });
            match outcome {
                Ok(session) => scan.sessions.push(session),
                Err(reason) => {
                    warn!("Skipping unreadable session file {}: {}", name, reason);
                    scan.skipped.push(SkippedEntry { name, reason });
                }
            }
        }

        scan.sessions.sort_by(|a, b| b.date().cmp(&a.date()));
        Ok(scan)
    }

    fn delete(&self, id: SessionId) -> Result<(), ArchiveError> {
        match fs::remove_file(self.session_path(id)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
