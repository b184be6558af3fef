//! Processor settings.

use std::path::PathBuf;

use serde::Deserialize;

use crate::encode::DEFAULT_QUALITY;

/// Well-known location of the overlay asset.
pub const DEFAULT_WATERMARK_PATH: &str = "watermark-white.png";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Quality for re-encoded JPEG derivatives (1-100).
    pub jpeg_quality: u8,
    /// PNG asset tiled over watermarked derivatives.
    pub watermark_path: PathBuf,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_QUALITY,
            watermark_path: PathBuf::from(DEFAULT_WATERMARK_PATH),
        }
    }
}
