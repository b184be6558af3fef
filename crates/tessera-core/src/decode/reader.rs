//! Format-dispatched decoding into RGBA buffers.

use std::io::Cursor;

use image::ImageReader;

use super::{DecodeError, ImageFormat, RasterImage};

/// Decode image bytes into an RGBA buffer.
///
/// The format is selected from the magic bytes, then the matching decoder
/// is invoked explicitly.
///
/// # Errors
///
/// Returns `DecodeError::Empty` for empty input, `DecodeError::UnsupportedFormat`
/// when no known signature matches and `DecodeError::Corrupted` if the decoder
/// rejects the stream.
pub fn decode(bytes: &[u8]) -> Result<RasterImage, DecodeError> {
    let format = detect(bytes)?;
    decode_as(bytes, format)
}

/// Decode bytes with an explicitly declared format, skipping detection.
pub fn decode_as(bytes: &[u8], format: ImageFormat) -> Result<RasterImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    let img = ImageReader::with_format(Cursor::new(bytes), format.to_image_format())
        .decode()
        .map_err(|e| DecodeError::Corrupted(e.to_string()))?;

    let raster = RasterImage::from_rgba_image(img.into_rgba8());
    if raster.is_empty() {
        return Err(DecodeError::Corrupted("image has zero area".to_string()));
    }

    tracing::debug!(
        ?format,
        width = raster.width,
        height = raster.height,
        "decoded image"
    );
    Ok(raster)
}

/// Read only the image header to obtain `(width, height)`.
///
/// No pixel buffer is allocated.
pub fn decode_header(bytes: &[u8]) -> Result<(u32, u32), DecodeError> {
    let format = detect(bytes)?;

    let (width, height) = ImageReader::with_format(Cursor::new(bytes), format.to_image_format())
        .into_dimensions()
        .map_err(|e| DecodeError::Corrupted(e.to_string()))?;

    if width == 0 || height == 0 {
        return Err(DecodeError::Corrupted(format!(
            "header declares degenerate dimensions {width}x{height}"
        )));
    }
    Ok((width, height))
}

/// Sniff the format of `bytes`, mapping failures onto decode errors.
pub fn detect(bytes: &[u8]) -> Result<ImageFormat, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }
    ImageFormat::sniff(bytes).ok_or_else(|| {
        tracing::warn!(len = bytes.len(), "rejected bytes with unknown signature");
        DecodeError::UnsupportedFormat
    })
}
