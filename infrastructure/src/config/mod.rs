//! Configuration loading
//!
//! - [`file_config::FileConfig`] — raw TOML structure
//! - [`loader::ConfigLoader`] — file discovery and multi-source merging

mod file_config;
mod loader;

pub use file_config::{FileConfig, FileImageConfig, FileInferenceConfig, FileStorageConfig};
pub use loader::ConfigLoader;
