//! Remote inference adapter.
//!
//! - [`client::HttpInferenceClient`] — reqwest-based gateway adapter
//! - [`protocol`] — wire payload types for the identification endpoint
//! - [`error::InferenceError`] — adapter errors

pub mod client;
pub mod error;
pub mod protocol;
