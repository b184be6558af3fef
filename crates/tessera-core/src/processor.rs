//! The three operations exposed to transport adapters.

use std::sync::Arc;

use crate::config::ProcessorConfig;
use crate::error::ProcessError;
use crate::metadata::{self, ImageMetadata};
use crate::thumbnail;
use crate::watermark::{self, MarkError, WatermarkMark};
use crate::{ImageRequest, ProcessedImage};

/// Stateless facade over metadata, thumbnail and watermark processing.
///
/// Cloning is cheap; the mark is shared read-only between clones and threads.
#[derive(Debug, Clone, Default)]
pub struct ImageProcessor {
    config: ProcessorConfig,
    mark: Option<Arc<WatermarkMark>>,
}

impl ImageProcessor {
    /// Create a processor without a watermark mark.
    pub fn new(config: ProcessorConfig) -> Self {
        Self { config, mark: None }
    }

    /// Create a processor using the process-wide mark, loading it from
    /// `config.watermark_path` on first use.
    pub fn from_config(config: ProcessorConfig) -> Result<Self, MarkError> {
        let mark = WatermarkMark::load_global(&config.watermark_path)?;
        Ok(Self {
            config,
            mark: Some(mark),
        })
    }

    /// Use `mark` for watermarking instead of the process-wide one.
    pub fn with_mark(mut self, mark: Arc<WatermarkMark>) -> Self {
        self.mark = Some(mark);
        self
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    pub fn has_mark(&self) -> bool {
        self.mark.is_some()
    }

    /// Width, height and human-readable size, without a full decode.
    pub fn compute_metadata(&self, request: &ImageRequest<'_>) -> Result<ImageMetadata, ProcessError> {
        let meta = metadata::extract(request.bytes)?;
        tracing::debug!(
            name = request.name,
            width = meta.width,
            height = meta.height,
            size = %meta.size,
            "computed metadata"
        );
        Ok(meta)
    }

    /// Pass the source through or resize it to 400x300.
    pub fn make_thumbnail(&self, request: &ImageRequest<'_>) -> Result<ProcessedImage, ProcessError> {
        thumbnail::make_thumbnail(request, self.config.jpeg_quality)
    }

    /// Tile the mark over the source.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::MissingWatermark` if no mark is available.
    pub fn make_watermarked(&self, request: &ImageRequest<'_>) -> Result<ProcessedImage, ProcessError> {
        let mark = self.mark.as_deref().ok_or(ProcessError::MissingWatermark)?;
        watermark::make_watermarked(request, mark, self.config.jpeg_quality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{ImageFormat, RasterImage};
    use crate::encode::encode;
    use crate::error::ErrorKind;

    fn jpeg(width: u32, height: u32) -> Vec<u8> {
        let img = RasterImage::filled(width, height, [120, 60, 30, 255]);
        encode(&img, ImageFormat::Jpeg, 75).unwrap()
    }

    fn processor_with_mark() -> ImageProcessor {
        let mark = WatermarkMark::from_raster(RasterImage::filled(8, 8, [255, 255, 255, 200])).unwrap();
        ImageProcessor::new(ProcessorConfig::default()).with_mark(Arc::new(mark))
    }

    #[test]
    fn test_compute_metadata() {
        let bytes = jpeg(40, 30);
        let request = ImageRequest::new(&bytes, "a.jpg");

        let meta = ImageProcessor::default().compute_metadata(&request).unwrap();
        assert_eq!((meta.width, meta.height), (40, 30));
    }

    #[test]
    fn test_watermark_requires_mark() {
        let bytes = jpeg(40, 30);
        let request = ImageRequest::new(&bytes, "a.jpg");

        let err = ImageProcessor::default()
            .make_watermarked(&request)
            .unwrap_err();
        assert_eq!(err, ProcessError::MissingWatermark);
        assert_eq!(err.kind(), ErrorKind::MissingWatermark);
    }

    #[test]
    fn test_watermark_with_mark() {
        let bytes = jpeg(40, 30);
        let request = ImageRequest::new(&bytes, "a.jpg");

        let out = processor_with_mark().make_watermarked(&request).unwrap();
        assert_eq!(out.name, "a-watermark.jpg");
        assert_eq!((out.width, out.height), (40, 30));
    }

    #[test]
    fn test_thumbnail_uses_configured_quality() {
        let bytes = jpeg(200, 100);
        let request = ImageRequest::new(&bytes, "a.jpg");

        let mut config = ProcessorConfig::default();
        config.jpeg_quality = 0;
        let err = ImageProcessor::new(config).make_thumbnail(&request).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EncodeError);
    }

    #[test]
    fn test_processor_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ImageProcessor>();
    }

    #[test]
    fn test_from_config_missing_asset() {
        let mut config = ProcessorConfig::default();
        config.watermark_path = "/no/such/mark.png".into();
        // Either the global mark is already installed by another test or the
        // missing file is reported; it must never panic.
        match ImageProcessor::from_config(config) {
            Ok(p) => assert!(p.has_mark()),
            Err(e) => assert!(matches!(e, MarkError::Io { .. })),
        }
    }
}
