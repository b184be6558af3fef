//! Tiled, semi-transparent watermarking.
//!
//! ## Algorithm
//!
//! 1. The cell size is one tenth of the source width, giving ten columns and
//!    as many rows as needed to reach the source height.
//! 2. The mark is fitted into one cell (aspect preserved, Lanczos3).
//! 3. A transparent layer the size of the source receives the fitted mark at
//!    every cell origin with "over" compositing.
//! 4. The layer is blended onto a copy of the source with a flat opacity of
//!    30/255 on top of each pixel's own alpha.

mod blend;
mod mark;
mod tile;

pub use blend::{blend_uniform, WATERMARK_OPACITY};
pub use mark::{MarkError, WatermarkMark};
pub use tile::{build_layer, fit_mark, TileGrid, TILE_COLUMNS};

use crate::decode::{decode, detect, RasterImage};
use crate::encode::encode;
use crate::error::{GeometryError, ProcessError};
use crate::naming::{with_suffix, WATERMARK_SUFFIX};
use crate::{ImageRequest, ProcessedImage};

/// Return a watermarked copy of `source`. Dimensions are unchanged.
///
/// # Errors
///
/// Returns `GeometryError::EmptySource` for an unusable buffer and
/// `GeometryError::DegenerateTile` for sources narrower than ten pixels.
pub fn apply(source: &RasterImage, mark: &WatermarkMark) -> Result<RasterImage, GeometryError> {
    let empty = || GeometryError::EmptySource {
        width: source.width,
        height: source.height,
    };
    if source.is_empty() {
        return Err(empty());
    }

    let grid = TileGrid::for_source(source.width, source.height)?;
    let tile = fit_mark(mark.image(), grid.cell);
    let layer = build_layer(source.width, source.height, &tile, &grid);

    let mut canvas = source.to_rgba_image().ok_or_else(empty)?;
    blend_uniform(&mut canvas, &layer, WATERMARK_OPACITY);

    tracing::debug!(
        width = source.width,
        height = source.height,
        cell = grid.cell,
        rows = grid.rows,
        tile_width = tile.width(),
        tile_height = tile.height(),
        "applied tiled watermark"
    );
    Ok(RasterImage::from_rgba_image(canvas))
}

/// Produce the watermarked derivative for a request, encoded in the source
/// format under the `-watermark` name.
pub fn make_watermarked(
    request: &ImageRequest<'_>,
    mark: &WatermarkMark,
    quality: u8,
) -> Result<ProcessedImage, ProcessError> {
    let format = detect(request.bytes)?;
    let source = decode(request.bytes)?;
    let marked = apply(&source, mark)?;
    let bytes = encode(&marked, format, quality)?;

    Ok(ProcessedImage {
        bytes,
        name: with_suffix(request.name, WATERMARK_SUFFIX),
        width: marked.width,
        height: marked.height,
        format,
    })
}
