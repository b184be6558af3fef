//! Tessera Core - Image derivative library
//!
//! This crate provides the algorithmic core behind image uploads: header-only
//! metadata, a width-driven thumbnail policy and a tiled watermark, together
//! with the codec, size formatting and naming helpers they share.

pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod metadata;
pub mod naming;
pub mod processor;
pub mod size;
pub mod store;
pub mod thumbnail;
pub mod watermark;

pub use config::ProcessorConfig;
pub use decode::{DecodeError, ImageFormat, RasterImage};
pub use encode::EncodeError;
pub use error::{ErrorKind, GeometryError, ProcessError};
pub use metadata::ImageMetadata;
pub use processor::ImageProcessor;
pub use size::{format_bytes, format_size, SizeError};
pub use store::{ByteSink, ByteSource, DirStore, MemoryStore, Pipeline, PipelineError, StoreError};
pub use watermark::{MarkError, WatermarkMark};

/// Source bytes and name handed in by a transport for one operation.
#[derive(Debug, Clone, Copy)]
pub struct ImageRequest<'a> {
    /// Encoded source image
    pub bytes: &'a [u8],
    /// Original file name or object path
    pub name: &'a str,
    /// Caller-declared width used by the thumbnail policy
    pub width_hint: Option<u32>,
}

impl<'a> ImageRequest<'a> {
    pub fn new(bytes: &'a [u8], name: &'a str) -> Self {
        Self {
            bytes,
            name,
            width_hint: None,
        }
    }

    pub fn with_width_hint(mut self, width_hint: Option<u32>) -> Self {
        self.width_hint = width_hint;
        self
    }
}

/// An encoded derivative, owned by the caller once returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedImage {
    pub bytes: Vec<u8>,
    /// Derived output name
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
}

impl ProcessedImage {
    /// MIME type of `bytes`.
    pub fn content_type(&self) -> &'static str {
        self.format.mime_type()
    }
}
