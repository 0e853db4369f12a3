//! Error types for the inference adapter

use thiserror::Error;

/// Result type alias for inference operations
pub type Result<T> = std::result::Result<T, InferenceError>;

/// Errors that can occur when talking to the inference endpoint
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Transport error: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Endpoint returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request timeout")]
    Timeout,
}
