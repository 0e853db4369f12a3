//! Infrastructure layer for curio
//!
//! This crate contains adapters that implement the contracts defined in the
//! domain and application layers, plus configuration file loading.

pub mod archive;
pub mod codec;
pub mod config;
pub mod inference;

// Re-export commonly used types
pub use archive::JsonChatArchive;
pub use codec::{CodecError, JpegCodec};
pub use config::{ConfigLoader, FileConfig, FileImageConfig, FileInferenceConfig, FileStorageConfig};
pub use inference::{
    client::{HttpInferenceClient, RequestSigner},
    error::{InferenceError, Result},
};
