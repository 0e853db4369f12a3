//! Attachment codec adapters.

mod jpeg;

pub use jpeg::{CodecError, JpegCodec};
