//! The overlay asset stamped by the compositor.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use image::RgbaImage;
use thiserror::Error;

use crate::decode::{decode, DecodeError, RasterImage};

static GLOBAL_MARK: OnceLock<Arc<WatermarkMark>> = OnceLock::new();

/// Errors that can occur while loading a mark.
#[derive(Debug, Error)]
pub enum MarkError {
    #[error("Failed to read watermark asset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode watermark asset: {0}")]
    Decode(#[from] DecodeError),

    #[error("Watermark buffer {width}x{height} needs {expected} bytes, got {actual}")]
    InvalidBuffer {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Immutable RGBA overlay, typically a white glyph with soft alpha edges.
#[derive(Debug, Clone, PartialEq)]
pub struct WatermarkMark {
    image: RgbaImage,
}

impl WatermarkMark {
    /// Decode a mark from encoded bytes (PNG keeps the alpha channel).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MarkError> {
        Self::from_raster(decode(bytes)?)
    }

    /// Read and decode a mark from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, MarkError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| MarkError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mark = Self::from_bytes(&bytes)?;
        tracing::info!(
            path = %path.display(),
            width = mark.width(),
            height = mark.height(),
            "loaded watermark asset"
        );
        Ok(mark)
    }

    /// Wrap an already decoded buffer.
    ///
    /// # Errors
    ///
    /// Returns `MarkError::InvalidBuffer` if the buffer length disagrees with
    /// the declared dimensions.
    pub fn from_raster(raster: RasterImage) -> Result<Self, MarkError> {
        let (width, height) = (raster.width, raster.height);
        let expected = width as usize * height as usize * 4;
        let actual = raster.pixels.len();
        let image = raster.into_rgba_image().ok_or(MarkError::InvalidBuffer {
            width,
            height,
            expected,
            actual,
        })?;
        Ok(Self { image })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub(crate) fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// The process-wide mark, if one has been installed.
    pub fn global() -> Option<Arc<WatermarkMark>> {
        GLOBAL_MARK.get().cloned()
    }

    /// Install the process-wide mark. The first installation wins; later
    /// calls return the mark that is already in place.
    pub fn install_global(mark: WatermarkMark) -> Arc<WatermarkMark> {
        GLOBAL_MARK.get_or_init(|| Arc::new(mark)).clone()
    }

    /// Return the process-wide mark, loading it from `path` on first use.
    pub fn load_global(path: impl AsRef<Path>) -> Result<Arc<WatermarkMark>, MarkError> {
        if let Some(mark) = Self::global() {
            return Ok(mark);
        }
        let mark = Self::from_path(path)?;
        Ok(Self::install_global(mark))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::ImageFormat;
    use crate::encode::{encode, DEFAULT_QUALITY};

    fn mark_png() -> Vec<u8> {
        let img = RasterImage::filled(12, 6, [255, 255, 255, 90]);
        encode(&img, ImageFormat::Png, DEFAULT_QUALITY).unwrap()
    }

    #[test]
    fn test_from_bytes_keeps_alpha() {
        let mark = WatermarkMark::from_bytes(&mark_png()).unwrap();

        assert_eq!((mark.width(), mark.height()), (12, 6));
        assert_eq!(mark.image().get_pixel(5, 5).0, [255, 255, 255, 90]);
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        assert!(matches!(
            WatermarkMark::from_bytes(b"nope"),
            Err(MarkError::Decode(DecodeError::UnsupportedFormat))
        ));
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = WatermarkMark::from_path("/definitely/not/here.png").unwrap_err();
        assert!(matches!(err, MarkError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.png"));
    }

    #[test]
    fn test_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mark.png");
        std::fs::write(&path, mark_png()).unwrap();

        let mark = WatermarkMark::from_path(&path).unwrap();
        assert_eq!(mark.width(), 12);
    }

    #[test]
    fn test_from_raster_rejects_short_buffer() {
        let raster = RasterImage {
            width: 4,
            height: 4,
            pixels: vec![255; 10],
        };

        let err = WatermarkMark::from_raster(raster).unwrap_err();
        assert!(matches!(
            err,
            MarkError::InvalidBuffer {
                width: 4,
                height: 4,
                expected: 64,
                actual: 10,
            }
        ));
    }

    #[test]
    fn test_global_first_install_wins() {
        let first = WatermarkMark::from_raster(RasterImage::filled(2, 2, [1, 1, 1, 1])).unwrap();
        let second = WatermarkMark::from_raster(RasterImage::filled(3, 3, [2, 2, 2, 2])).unwrap();

        let installed = WatermarkMark::install_global(first);
        let again = WatermarkMark::install_global(second);

        assert!(Arc::ptr_eq(&installed, &again));
        assert!(Arc::ptr_eq(&installed, &WatermarkMark::global().unwrap()));
        // Loading never replaces an installed mark, even from a bad path
        let loaded = WatermarkMark::load_global("/missing.png").unwrap();
        assert!(Arc::ptr_eq(&installed, &loaded));
    }
}
