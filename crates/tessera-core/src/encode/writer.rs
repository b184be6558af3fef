//! In-memory encoding of RGBA buffers.
//!
//! JPEG output drops the alpha channel; PNG output is lossless and keeps it.
//! Both write straight into a `Vec<u8>` so callers can hand the buffer to
//! storage without touching the local disk.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;
use thiserror::Error;

use crate::decode::{ImageFormat, RasterImage};

/// Quality used when the caller has no preference.
///
/// Matches the usual "good visual quality, moderate size" JPEG setting.
pub const DEFAULT_QUALITY: u8 = 75;

/// Errors that can occur during encoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Width or height is zero, or the buffer holds no pixels
    #[error("Cannot encode an empty image ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Quality outside the encoder's 1-100 range
    #[error("Invalid quality {0}: must be between 1 and 100")]
    InvalidQuality(u8),

    /// The underlying encoder failed
    #[error("{format:?} encoding failed: {message}")]
    EncodingFailed { format: ImageFormat, message: String },
}

/// Encode an RGBA image to the requested format.
///
/// # Arguments
///
/// * `image` - Source RGBA buffer
/// * `format` - Output container
/// * `quality` - JPEG quality (1-100); validated for PNG but otherwise unused
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for archival or further editing
/// * 75-90: Good quality, recommended for most uses (default: 75)
/// * Below 60: Low quality, visible artifacts
pub fn encode(image: &RasterImage, format: ImageFormat, quality: u8) -> Result<Vec<u8>, EncodeError> {
    validate(image, quality)?;

    let mut buffer = Cursor::new(Vec::new());
    let result = match format {
        ImageFormat::Jpeg => {
            let rgb = strip_alpha(&image.pixels);
            JpegEncoder::new_with_quality(&mut buffer, quality).write_image(
                &rgb,
                image.width,
                image.height,
                ExtendedColorType::Rgb8,
            )
        }
        ImageFormat::Png => PngEncoder::new(&mut buffer).write_image(
            &image.pixels,
            image.width,
            image.height,
            ExtendedColorType::Rgba8,
        ),
    };
    result.map_err(|e| EncodeError::EncodingFailed {
        format,
        message: e.to_string(),
    })?;

    let bytes = buffer.into_inner();
    tracing::debug!(
        ?format,
        quality,
        width = image.width,
        height = image.height,
        len = bytes.len(),
        "encoded image"
    );
    Ok(bytes)
}

fn validate(image: &RasterImage, quality: u8) -> Result<(), EncodeError> {
    if image.is_empty() {
        return Err(EncodeError::EmptyImage {
            width: image.width,
            height: image.height,
        });
    }

    let expected = image.width as usize * image.height as usize * 4;
    if image.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }

    if !(1..=100).contains(&quality) {
        return Err(EncodeError::InvalidQuality(quality));
    }
    Ok(())
}

fn strip_alpha(rgba: &[u8]) -> Vec<u8> {
    rgba.chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect()
}


// ============================================================================
// Property-Based Tests
// ============================================================================
