//! Domain layer for curio
//!
//! This crate contains the chat entities and the storage contract for the
//! image-identification assistant. It has no dependencies on infrastructure
//! or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Chat session
//!
//! A [`ChatSession`] is one conversation thread: an ordered, append-only
//! message history plus metadata (title, last-activity timestamp). Each
//! [`Message`] is a single turn, authored by the user or by the remote
//! assistant, carrying optional text and/or a compressed photo.
//!
//! ## Archive
//!
//! The [`ChatArchive`] trait is the durable-storage abstraction: one record
//! per session, keyed by session id. Implementations live in the
//! infrastructure layer so callers can substitute an in-memory or
//! temporary-directory store in tests.

pub mod chat;
pub mod core;

// Re-export commonly used types
pub use chat::{
    entities::{ChatSession, Message, MessageId, Role, SessionId},
    image::ImageData,
    repository::{ArchiveError, ArchiveScan, ChatArchive, SkippedEntry},
};
pub use core::error::DomainError;
