//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Empty message: a turn needs text, an image, or both")]
    EmptyMessage,
}
