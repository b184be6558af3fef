//! Box-filter (area-averaging) resampling.
//!
//! Resizing runs through `fast_image_resize` with a box convolution. Alpha is
//! premultiplied during the convolution so transparent pixels do not bleed
//! their RGB into opaque neighbours.

use fast_image_resize as fr;

use crate::decode::RasterImage;
use crate::error::GeometryError;

/// Resize an image to exact dimensions with a box filter.
///
/// Aspect ratio is not preserved. Returns a new image; the input is untouched.
///
/// # Errors
///
/// Returns `GeometryError::ZeroTarget` if either target dimension is zero and
/// `GeometryError::EmptySource` if the source buffer is unusable.
pub fn resize(image: &RasterImage, width: u32, height: u32) -> Result<RasterImage, GeometryError> {
    if width == 0 || height == 0 {
        return Err(GeometryError::ZeroTarget { width, height });
    }
    let empty = || GeometryError::EmptySource {
        width: image.width,
        height: image.height,
    };
    if image.is_empty() || !image.is_consistent() {
        return Err(empty());
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let src = fr::images::Image::from_vec_u8(
        image.width,
        image.height,
        image.pixels.clone(),
        fr::PixelType::U8x4,
    )
    .map_err(|_| empty())?;
    let mut dst = fr::images::Image::new(width, height, fr::PixelType::U8x4);

    let options =
        fr::ResizeOptions::new().resize_alg(fr::ResizeAlg::Convolution(fr::FilterType::Box));
    fr::Resizer::new()
        .resize(&src, &mut dst, Some(&options))
        .map_err(|e| GeometryError::ResampleFailed(e.to_string()))?;

    Ok(RasterImage::new(width, height, dst.into_vec()))
}
