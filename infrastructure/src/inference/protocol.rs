//! Wire payload for the identification endpoint.
//!
//! The endpoint accepts a single POST of `{"messages": [...]}` where each
//! entry carries a role, optional text under the key `message`, and an
//! optional base64 image. The response body is plain text, not JSON.

use curio_domain::{Message, Role};
use serde::Serialize;

/// A single outgoing message descriptor.
#[derive(Debug, Serialize)]
pub struct WireMessage {
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// The POST body: the full ordered history of a session.
#[derive(Debug, Serialize)]
pub struct InferenceRequest {
    pub messages: Vec<WireMessage>,
}

impl InferenceRequest {
    pub fn from_history(history: &[Message]) -> Self {
        let messages = history
            .iter()
            .map(|m| WireMessage {
                role: m.role,
                message: m.text.clone(),
                image: m.image.as_ref().map(|img| img.to_base64()),
            })
            .collect();
        Self { messages }
    }
}
