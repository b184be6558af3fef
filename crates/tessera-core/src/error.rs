//! Error taxonomy shared by the processing operations.
//!
//! Each stage keeps its own error type; [`ProcessError`] gathers them so the
//! external interface can report a stable [`ErrorKind`] alongside a message.

use serde::Serialize;
use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::size::SizeError;

/// Degenerate dimensions for a resize or tiling step.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// Target width or height is zero.
    #[error("Invalid target dimensions {width}x{height}: both must be non-zero")]
    ZeroTarget { width: u32, height: u32 },

    /// The source buffer has no pixels or disagrees with its dimensions.
    #[error("Source image {width}x{height} has no usable pixels")]
    EmptySource { width: u32, height: u32 },

    /// The source is too narrow to produce a non-empty watermark tile.
    #[error("Source width {width} yields a zero-size watermark tile (need at least {min} px)")]
    DegenerateTile { width: u32, min: u32 },

    /// The resampler rejected the buffers.
    #[error("Resampling failed: {0}")]
    ResampleFailed(String),
}

/// Stable, transport-friendly error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    DecodeError,
    EncodeError,
    InvalidGeometry,
    InvalidInput,
    MissingWatermark,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::DecodeError => "decode_error",
            ErrorKind::EncodeError => "encode_error",
            ErrorKind::InvalidGeometry => "invalid_geometry",
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::MissingWatermark => "missing_watermark",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any failure of a processing operation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProcessError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    InvalidGeometry(#[from] GeometryError),

    #[error(transparent)]
    InvalidInput(#[from] SizeError),

    /// A watermark was requested but no mark has been loaded.
    #[error("No watermark mark is loaded")]
    MissingWatermark,
}

impl ProcessError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProcessError::Decode(_) => ErrorKind::DecodeError,
            ProcessError::Encode(_) => ErrorKind::EncodeError,
            ProcessError::InvalidGeometry(_) => ErrorKind::InvalidGeometry,
            ProcessError::InvalidInput(_) => ErrorKind::InvalidInput,
            ProcessError::MissingWatermark => ErrorKind::MissingWatermark,
        }
    }
}
