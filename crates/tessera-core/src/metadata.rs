//! Header-only metadata extraction.

use serde::Serialize;

use crate::decode::{decode_header, DecodeError};
use crate::size::format_bytes;

/// Dimensions and size of an encoded image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMetadata {
    pub width: u32,
    pub height: u32,
    /// Length of the encoded bytes.
    pub file_size: u64,
    /// `file_size` formatted for display, e.g. `"1.5 KB"`.
    pub size: String,
}

/// Read width and height from the header and format the byte length.
///
/// The pixel data is never decoded.
pub fn extract(bytes: &[u8]) -> Result<ImageMetadata, DecodeError> {
    let file_size = bytes.len() as u64;
    let (width, height) = decode_header(bytes)?;

    Ok(ImageMetadata {
        width,
        height,
        file_size,
        size: format_bytes(file_size),
    })
}
