//! Bounded JPEG transcoding for photo attachments.
//!
//! Photos leave the device as bounded JPEG payloads: anything taller than
//! the configured height is scaled down proportionally first, then encoded
//! at a fixed quality. The output size is therefore bounded in dimensions
//! but not in bytes — quality is fixed, not fitted to a byte budget.

use curio_domain::ImageData;
use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use thiserror::Error;

/// Errors raised while preparing an attachment
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("JPEG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Height-bounded JPEG codec for message attachments.
///
/// Callers that fail to encode a photo treat the attachment as absent and
/// continue without it; a bad photo never sinks the whole send.
#[derive(Debug, Clone, Copy)]
pub struct JpegCodec {
    max_height: u32,
    quality: f32,
}

impl Default for JpegCodec {
    fn default() -> Self {
        Self {
            max_height: 1000,
            quality: 0.4,
        }
    }
}

impl JpegCodec {
    /// `quality` is in `[0, 1]`; values outside the range are clamped.
    pub fn new(max_height: u32, quality: f32) -> Self {
        Self {
            max_height,
            quality: quality.clamp(0.0, 1.0),
        }
    }

    pub fn max_height(&self) -> u32 {
        self.max_height
    }

    /// Compress `source` into attachment bytes, scaling proportionally when
    /// it exceeds the height bound. Images at or below the bound keep their
    /// dimensions.
    pub fn encode(&self, source: &DynamicImage) -> Result<ImageData, CodecError> {
        let (width, height) = (source.width(), source.height());
        let pixels = if height > self.max_height {
            let scaled_width = scaled_width(width, height, self.max_height);
            source
                .resize_exact(scaled_width, self.max_height, FilterType::Triangle)
                .to_rgb8()
        } else {
            source.to_rgb8()
        };

        let mut bytes = Vec::new();
        JpegEncoder::new_with_quality(&mut bytes, self.jpeg_quality()).encode_image(&pixels)?;
        Ok(ImageData::new(bytes))
    }

    fn jpeg_quality(&self) -> u8 {
        ((self.quality * 100.0).round() as u8).clamp(1, 100)
    }
}

/// Width after scaling `height` down to `max_height`, aspect preserved.
fn scaled_width(width: u32, height: u32, max_height: u32) -> u32 {
    let scaled = f64::from(width) * f64::from(max_height) / f64::from(height);
    (scaled.round() as u32).max(1)
}
