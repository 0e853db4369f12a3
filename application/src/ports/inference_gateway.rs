//! Inference gateway port
//!
//! Defines the interface for reaching the remote identification endpoint.

use async_trait::async_trait;
use curio_domain::Message;
use thiserror::Error;

/// Errors that can occur during gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,
}

/// Gateway to the remote inference endpoint
///
/// The application layer hands over the full ordered message history of a
/// session and receives the assistant's reply as plain text — the endpoint
/// replies with an unstructured body, not JSON. Implementations (adapters)
/// live in the infrastructure layer.
#[async_trait]
pub trait InferenceGateway: Send + Sync {
    /// Send the conversation so far and return the raw reply text.
    async fn complete(&self, history: &[Message]) -> Result<String, GatewayError>;
}
