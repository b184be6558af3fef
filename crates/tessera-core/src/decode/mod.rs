//! Image decoding for Tessera.
//!
//! This module provides functionality for:
//! - Detecting the raster format from magic bytes or a declared MIME type
//! - Decoding JPEG and PNG bytes into RGBA buffers
//! - Reading only the header to obtain dimensions cheaply
//!
//! # Architecture
//!
//! Format selection is an explicit dispatch table ([`ImageFormat::sniff`]);
//! the matching `image` decoder is then invoked directly. Decoding is
//! stateless and safe to call concurrently on independent inputs.
//!
//! # Examples
//!
//! ```ignore
//! use tessera_core::decode::{decode, decode_header};
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let (w, h) = decode_header(&bytes).unwrap();
//! let image = decode(&bytes).unwrap();
//! assert_eq!((image.width, image.height), (w, h));
//! ```

mod reader;
mod types;

pub use reader::{decode, decode_as, decode_header, detect};
pub use types::{DecodeError, ImageFormat, RasterImage};
