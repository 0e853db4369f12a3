//! Chat archive trait

use crate::chat::entities::{ChatSession, SessionId};
use thiserror::Error;

/// Errors raised by archive operations
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode session: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to decode session: {0}")]
    Decode(#[source] serde_json::Error),
}

/// A storage entry that could not be read during a bulk scan
#[derive(Debug)]
pub struct SkippedEntry {
    /// File name of the unreadable entry
    pub name: String,
    /// Why it was skipped
    pub reason: String,
}

/// Result of a bulk load: every decodable session plus a report of the
/// entries that were not. Corrupt files are skipped, never fatal, but the
/// caller always learns how many and why.
#[derive(Debug, Default)]
pub struct ArchiveScan {
    /// Sessions sorted by last activity, most recent first
    pub sessions: Vec<ChatSession>,
    /// Entries that failed to decode
    pub skipped: Vec<SkippedEntry>,
}

/// Repository trait for chat sessions
///
/// This is a domain-level abstraction that defines how sessions are
/// persisted and retrieved. Implementations live in the infrastructure
/// layer; tests substitute an in-memory or temporary-directory store.
pub trait ChatArchive: Send + Sync {
    /// Persist `session`, overwriting any prior record with the same id.
    /// Re-saving an unchanged session is a no-op in effect.
    fn save(&self, session: &ChatSession) -> Result<(), ArchiveError>;

    /// Load one session by id. `Ok(None)` when no record exists.
    fn load(&self, id: SessionId) -> Result<Option<ChatSession>, ArchiveError>;

    /// Load every stored session, most recently active first.
    fn load_all(&self) -> Result<ArchiveScan, ArchiveError>;

    /// Remove the session's record. Deleting an absent id is not an error.
    fn delete(&self, id: SessionId) -> Result<(), ArchiveError>;
}
