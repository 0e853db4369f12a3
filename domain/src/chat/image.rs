//! Compressed photo attachments.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Compressed JPEG bytes of a message attachment (Value Object).
///
/// This is the canonical representation of a photo once it leaves the
/// capture layer: the codec produces it, the session record carries it, and
/// the wire payload transports it. In JSON it appears as base64 text, both
/// in stored session files and in the request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData(Vec<u8>);

impl ImageData {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encode the bytes as base64 text for JSON transport.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.0)
    }

    /// Decode base64 text back into attachment bytes.
    pub fn from_base64(text: &str) -> Result<Self, base64::DecodeError> {
        STANDARD.decode(text).map(Self)
    }
}

impl Serialize for ImageData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for ImageData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_base64(&text).map_err(serde::de::Error::custom)
    }
}
