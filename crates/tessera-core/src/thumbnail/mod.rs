//! Fixed-size thumbnail policy.
//!
//! The decision is driven by the source width alone:
//!
//! | Width            | Decision                                    |
//! |------------------|---------------------------------------------|
//! | `>= 800`         | pass through, name and bytes unchanged      |
//! | `<= 400`         | box-resize to exactly 400x300, `-400x300`   |
//! | `401..=799`      | pass through                                |
//!
//! The resize ignores the source aspect ratio.

mod resize;

pub use resize::resize;

use crate::decode::{decode, decode_header, detect};
use crate::encode::encode;
use crate::error::ProcessError;
use crate::naming::{with_suffix, THUMBNAIL_SUFFIX};
use crate::{ImageRequest, ProcessedImage};

/// Sources at least this wide are left alone.
pub const PASS_THROUGH_MIN_WIDTH: u32 = 800;

/// Sources at most this wide are resized.
pub const RESIZE_MAX_WIDTH: u32 = 400;

/// Output width of a resized thumbnail.
pub const THUMBNAIL_WIDTH: u32 = 400;

/// Output height of a resized thumbnail.
pub const THUMBNAIL_HEIGHT: u32 = 300;

/// What to do with a source of a given width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbnailDecision {
    /// Keep the source as is.
    PassThrough,
    /// Resize to exactly these dimensions.
    Resize { width: u32, height: u32 },
}

/// Classify a source width.
///
/// Widths strictly between 400 and 800 pass through as well, so every width
/// has a defined outcome.
pub fn classify(width: u32) -> ThumbnailDecision {
    if width <= RESIZE_MAX_WIDTH {
        ThumbnailDecision::Resize {
            width: THUMBNAIL_WIDTH,
            height: THUMBNAIL_HEIGHT,
        }
    } else {
        if width < PASS_THROUGH_MIN_WIDTH {
            tracing::debug!(width, "width in the unsized band, passing through");
        }
        ThumbnailDecision::PassThrough
    }
}

/// Produce the thumbnail derivative for a request.
///
/// The classification width is the caller's hint when given, otherwise the
/// width read from the header. Pass-through only parses the header and
/// returns the original bytes; resizing decodes, resizes and re-encodes in
/// the source format.
pub fn make_thumbnail(request: &ImageRequest<'_>, quality: u8) -> Result<ProcessedImage, ProcessError> {
    let format = detect(request.bytes)?;
    let (src_width, src_height) = decode_header(request.bytes)?;
    let width = request.width_hint.unwrap_or(src_width);

    match classify(width) {
        ThumbnailDecision::PassThrough => {
            tracing::debug!(name = request.name, width, "thumbnail pass-through");
            Ok(ProcessedImage {
                bytes: request.bytes.to_vec(),
                name: request.name.to_string(),
                width: src_width,
                height: src_height,
                format,
            })
        }
        ThumbnailDecision::Resize { width, height } => {
            let source = decode(request.bytes)?;
            let resized = resize(&source, width, height)?;
            let bytes = encode(&resized, format, quality)?;
            let name = with_suffix(request.name, THUMBNAIL_SUFFIX);

            tracing::debug!(
                src = request.name,
                dst = %name,
                from_width = source.width,
                from_height = source.height,
                "thumbnail resized"
            );
            Ok(ProcessedImage {
                bytes,
                name,
                width,
                height,
                format,
            })
        }
    }
}
