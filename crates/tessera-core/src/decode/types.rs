//! Core types for image decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// No bytes were supplied.
    #[error("Empty image data")]
    Empty,

    /// The magic bytes do not match any supported format.
    #[error("Invalid or unsupported image format")]
    UnsupportedFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    Corrupted(String),
}

/// Raster formats the codec can dispatch to.
///
/// JPEG covers photographic uploads, PNG covers the lossless overlay asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Png,
}

/// Magic-byte signatures, checked in order.
const SIGNATURES: &[(&[u8], ImageFormat)] = &[
    (&[0xFF, 0xD8, 0xFF], ImageFormat::Jpeg),
    (
        &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A],
        ImageFormat::Png,
    ),
];

impl ImageFormat {
    /// Detect the format from the leading bytes of a file.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        SIGNATURES
            .iter()
            .find(|(magic, _)| bytes.starts_with(magic))
            .map(|&(_, format)| format)
    }

    /// Resolve a declared MIME type such as `image/jpeg`.
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Some(ImageFormat::Jpeg),
            "image/png" => Some(ImageFormat::Png),
            _ => None,
        }
    }

    /// Canonical MIME type for encoded output.
    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
        }
    }

    /// Convert to the image crate's ImageFormat.
    pub fn to_image_format(self) -> image::ImageFormat {
        match self {
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Png => image::ImageFormat::Png,
        }
    }
}

/// A decoded image with RGBA pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel, straight alpha).
    /// Length should be width * height * 4.
    pub pixels: Vec<u8>,
}

impl RasterImage {
    /// Create a new RasterImage with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * 4,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create an image filled with a single RGBA colour.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = rgba
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Self::new(width, height, pixels)
    }

    /// Create a RasterImage from an image::RgbaImage.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an image::RgbaImage for further processing.
    ///
    /// Clones the pixel data. Returns `None` if the buffer length does not
    /// match the dimensions.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Consume into an image::RgbaImage without copying.
    pub fn into_rgba_image(self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels)
    }

    /// RGBA value at `(x, y)`, or `None` outside the image or past the end
    /// of an inconsistent buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.pixels.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// Check that the buffer length agrees with the dimensions.
    pub fn is_consistent(&self) -> bool {
        self.pixels.len() == self.width as usize * self.height as usize * 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_jpeg() {
        assert_eq!(
            ImageFormat::sniff(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00]),
            Some(ImageFormat::Jpeg)
        );
    }

    #[test]
    fn test_sniff_png() {
        let header = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00];
        assert_eq!(ImageFormat::sniff(&header), Some(ImageFormat::Png));
    }

    #[test]
    fn test_sniff_unknown_and_short() {
        assert_eq!(ImageFormat::sniff(b"GIF89a"), None);
        assert_eq!(ImageFormat::sniff(&[0xFF, 0xD8]), None);
        assert_eq!(ImageFormat::sniff(&[]), None);
    }

    #[test]
    fn test_from_mime_type() {
        assert_eq!(ImageFormat::from_mime_type("image/jpeg"), Some(ImageFormat::Jpeg));
        assert_eq!(
            ImageFormat::from_mime_type("Image/PNG; charset=binary"),
            Some(ImageFormat::Png)
        );
        assert_eq!(ImageFormat::from_mime_type("image/svg+xml"), None);
    }

    #[test]
    fn test_format_conversion() {
        assert_eq!(ImageFormat::Jpeg.to_image_format(), image::ImageFormat::Jpeg);
        assert_eq!(ImageFormat::Png.to_image_format(), image::ImageFormat::Png);
        assert_eq!(ImageFormat::Png.mime_type(), "image/png");
    }

    #[test]
    fn test_raster_image_creation() {
        let img = RasterImage::filled(100, 50, [1, 2, 3, 255]);

        assert_eq!(img.width, 100);
        assert_eq!(img.height, 50);
        assert_eq!(img.pixel_count(), 5000);
        assert_eq!(img.pixels.len(), 20000);
        assert_eq!(img.pixel(99, 49), Some([1, 2, 3, 255]));
        assert!(!img.is_empty());
        assert!(img.is_consistent());
    }

    #[test]
    fn test_pixel_out_of_range() {
        let img = RasterImage::filled(4, 3, [9, 9, 9, 255]);
        assert_eq!(img.pixel(4, 0), None);
        assert_eq!(img.pixel(0, 3), None);

        let short = RasterImage {
            width: 4,
            height: 4,
            pixels: vec![0; 10],
        };
        assert_eq!(short.pixel(3, 3), None);
    }

    #[test]
    fn test_raster_image_empty() {
        let img = RasterImage::new(0, 0, vec![]);
        assert!(img.is_empty());
    }

    #[test]
    fn test_rgba_image_conversion() {
        let rgba = image::RgbaImage::from_pixel(3, 2, image::Rgba([9, 8, 7, 6]));
        let img = RasterImage::from_rgba_image(rgba);
        assert_eq!((img.width, img.height), (3, 2));

        let back = img.to_rgba_image().unwrap();
        assert_eq!(back.get_pixel(2, 1).0, [9, 8, 7, 6]);
    }

    #[test]
    fn test_decode_error_display() {
        assert_eq!(
            DecodeError::UnsupportedFormat.to_string(),
            "Invalid or unsupported image format"
        );
        assert_eq!(
            DecodeError::Corrupted("eof".to_string()).to_string(),
            "Corrupted or incomplete image file: eof"
        );
    }
}
