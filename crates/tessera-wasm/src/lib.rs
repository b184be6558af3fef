//! Tessera WASM - WebAssembly bindings for Tessera
//!
//! This crate is the upload-backed adapter: JavaScript hands over the bytes of
//! an uploaded image and receives metadata or an encoded derivative back.
//!
//! # Module Structure
//!
//! - `process` - Metadata, thumbnail and watermark bindings
//! - `types` - WASM-compatible wrapper types for results and errors
//!
//! # Usage
//!
//! ```typescript
//! import init, { make_thumbnail } from '@tessera/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const thumb = make_thumbnail(bytes, file.name);
//! console.log(`${thumb.name}: ${thumb.width}x${thumb.height}`);
//! ```

use wasm_bindgen::prelude::*;

mod process;
mod types;

pub use process::{compute_metadata, make_thumbnail, make_watermarked, set_watermark};
pub use types::JsProcessedImage;

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
