//! Send message use case.
//!
//! Appends a user turn to a session, forwards the full message history to
//! the inference endpoint, and appends the reply as a system turn.
//!
//! Sends on one session are serialized by construction: [`execute`] borrows
//! the session mutably, so a second send cannot start until the first has
//! completed and replies can never interleave out of order. Persistence
//! stays with the caller — save the session through the archive once a send
//! returns.
//!
//! [`execute`]: SendMessageUseCase::execute

use crate::ports::inference_gateway::{GatewayError, InferenceGateway};
use curio_domain::{ChatSession, DomainError, ImageData, Role};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that can occur while sending a message.
#[derive(Error, Debug)]
pub enum SendMessageError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Send cancelled")]
    Cancelled,
}

/// Input for the [`SendMessageUseCase`]: the user's text and/or an
/// already-compressed photo.
#[derive(Debug, Clone, Default)]
pub struct SendMessageInput {
    pub text: Option<String>,
    pub image: Option<ImageData>,
}

impl SendMessageInput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            image: None,
        }
    }

    pub fn with_image(mut self, image: ImageData) -> Self {
        self.image = Some(image);
        self
    }
}

/// Use case for sending a user turn and collecting the assistant's reply.
pub struct SendMessageUseCase {
    gateway: Arc<dyn InferenceGateway>,
}

impl SendMessageUseCase {
    pub fn new(gateway: Arc<dyn InferenceGateway>) -> Self {
        Self { gateway }
    }

    /// Execute one send against `session`.
    ///
    /// The user turn stays in the conversation whatever happens next; the
    /// reply is appended only on success. On gateway failure the history is
    /// left untouched and the error is returned to the caller — nothing is
    /// swallowed into a log line.
    ///
    /// `cancel` guards against a session deleted or replaced while the
    /// request is in flight: once the token fires, the reply is dropped and
    /// `Err(Cancelled)` comes back instead of a mutation of dead state.
    pub async fn execute(
        &self,
        session: &mut ChatSession,
        input: SendMessageInput,
        cancel: &CancellationToken,
    ) -> Result<(), SendMessageError> {
        session.append_message(Role::User, input.text, input.image)?;
        session.set_sending(true);

        // The endpoint wants the entire history, not just the new turn
        let history = session.messages().to_vec();
        debug!("Dispatching {} messages for session {}", history.len(), session.id());

        let outcome = tokio::select! {
            _ = cancel.cancelled() => {
                session.set_sending(false);
                warn!("Send cancelled for session {}", session.id());
                return Err(SendMessageError::Cancelled);
            }
            reply = self.gateway.complete(&history) => reply,
        };

        session.set_sending(false);

        match outcome {
            Ok(reply) => {
                info!("Session {} received a {}-byte reply", session.id(), reply.len());
                session.append_message(Role::System, Some(reply), None)?;
                Ok(())
            }
            Err(e) => {
                warn!("Inference request failed for session {}: {}", session.id(), e);
                Err(e.into())
            }
        }
    }
}
