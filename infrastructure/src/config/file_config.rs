//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.

use crate::codec::JpegCodec;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Remote inference endpoint settings
    pub inference: FileInferenceConfig,
    /// Session storage settings
    pub storage: FileStorageConfig,
    /// Attachment codec settings
    pub image: FileImageConfig,
}

/// `[inference]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileInferenceConfig {
    /// Endpoint URL receiving the message history
    pub endpoint: String,
    /// Shared secret for request signing; unset leaves requests unsigned
    pub shared_secret: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FileInferenceConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://antique-worker.jkersh123.workers.dev".to_string(),
            shared_secret: None,
            timeout_secs: 60,
        }
    }
}

/// `[storage]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Root directory; unset falls back to the platform data dir
    pub root: Option<PathBuf>,
    /// Folder under the root holding session files
    pub folder_name: String,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            root: None,
            folder_name: "SavedChats".to_string(),
        }
    }
}

impl FileStorageConfig {
    /// Resolve the storage root: the explicit `root` if set, otherwise the
    /// platform data directory.
    pub fn resolved_root(&self) -> Option<PathBuf> {
        self.root
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join("curio")))
    }
}

/// `[image]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileImageConfig {
    /// Max attachment height in pixels; taller photos are scaled down
    pub max_height: u32,
    /// JPEG quality in `[0, 1]`
    pub quality: f32,
}

impl Default for FileImageConfig {
    fn default() -> Self {
        Self {
            max_height: 1000,
            quality: 0.4,
        }
    }
}

impl From<&FileImageConfig> for JpegCodec {
    fn from(config: &FileImageConfig) -> Self {
        JpegCodec::new(config.max_height, config.quality)
    }
}
