//! File-per-session JSON storage.

mod json_archive;

pub use json_archive::JsonChatArchive;
