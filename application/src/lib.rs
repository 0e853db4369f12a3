//! Application layer for curio
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::inference_gateway::{GatewayError, InferenceGateway};
pub use use_cases::send_message::{SendMessageError, SendMessageInput, SendMessageUseCase};
