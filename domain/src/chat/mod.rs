//! Chat session domain.
//!
//! - [`entities::ChatSession`] — one conversation with its message history
//! - [`entities::Message`] — a single user or assistant turn
//! - [`image::ImageData`] — compressed photo bytes attached to a turn
//! - [`repository::ChatArchive`] — trait for session persistence

pub mod entities;
pub mod image;
pub mod repository;
