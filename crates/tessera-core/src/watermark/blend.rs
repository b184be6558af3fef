//! Flat-opacity "over" compositing of the tiled layer.

use image::RgbaImage;

/// Global opacity applied to the whole overlay: 30/255, about 11.8%.
pub const WATERMARK_OPACITY: u8 = 30;

/// Composite `layer` over `dst` with a uniform mask of `opacity / 255`.
///
/// The effective source alpha at each pixel is the layer's own alpha scaled
/// by the mask, so soft tile edges keep their shape while the overlay as a
/// whole stays faint. Both images use straight (non-premultiplied) alpha and
/// must have the same dimensions; the overlapping area is blended otherwise.
pub fn blend_uniform(dst: &mut RgbaImage, layer: &RgbaImage, opacity: u8) {
    let mask = opacity as f32 / 255.0;
    let width = dst.width().min(layer.width());
    let height = dst.height().min(layer.height());

    for y in 0..height {
        for x in 0..width {
            let src = layer.get_pixel(x, y).0;
            let src_a = src[3] as f32 / 255.0 * mask;
            if src_a <= 0.0 {
                continue;
            }

            let out = dst.get_pixel_mut(x, y);
            let dst_a = out[3] as f32 / 255.0;
            let out_a = src_a + dst_a * (1.0 - src_a);
            for c in 0..3 {
                let blended = (src[c] as f32 * src_a + out[c] as f32 * dst_a * (1.0 - src_a)) / out_a;
                out[c] = blended.round().clamp(0.0, 255.0) as u8;
            }
            out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
        }
    }
}
