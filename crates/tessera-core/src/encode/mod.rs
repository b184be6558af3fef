//! Image encoding for Tessera.
//!
//! This module provides functionality for:
//! - Encoding RGBA buffers to JPEG with configurable quality
//! - Encoding RGBA buffers to lossless PNG
//!
//! All output goes to an in-memory buffer.
//!
//! # Examples
//!
//! ```ignore
//! use tessera_core::decode::{ImageFormat, RasterImage};
//! use tessera_core::encode::{encode, DEFAULT_QUALITY};
//!
//! let image = RasterImage::filled(100, 100, [128, 128, 128, 255]);
//! let jpeg_bytes = encode(&image, ImageFormat::Jpeg, DEFAULT_QUALITY).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod writer;

pub use writer::{encode, EncodeError, DEFAULT_QUALITY};
