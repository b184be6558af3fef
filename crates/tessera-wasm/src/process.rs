//! Upload-backed bindings for the three derivative operations.
//!
//! The browser hands over the uploaded bytes and the object name; results go
//! back as [`JsProcessedImage`] (or a plain metadata object) and the caller
//! uploads them wherever it likes.
//!
//! # Example
//!
//! ```typescript
//! import { set_watermark, make_thumbnail, compute_metadata } from '@tessera/wasm';
//!
//! set_watermark(new Uint8Array(await markFile.arrayBuffer()));
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const meta = compute_metadata(bytes, file.name);  // { width, height, fileSize, size }
//! const thumb = make_thumbnail(bytes, file.name, meta.width);
//! await upload(thumb.name, new Blob([thumb.bytes()], { type: thumb.content_type }));
//! ```

use tessera_core::{
    ImageMetadata, ImageProcessor, ImageRequest, MarkError, ProcessError, ProcessedImage,
    ProcessorConfig, WatermarkMark,
};
use wasm_bindgen::prelude::*;

use crate::types::{JsProcessError, JsProcessedImage};

/// Install the overlay used by [`make_watermarked`].
///
/// Only the first successful call takes effect; the mark is shared by every
/// later call for the lifetime of the module.
#[wasm_bindgen]
pub fn set_watermark(bytes: &[u8]) -> Result<(), JsValue> {
    install_mark(bytes).map_err(|e| to_js_error("set_watermark", JsProcessError::from(&e)))
}

/// Width, height and human-readable size of an uploaded image.
///
/// Returns `{ width, height, fileSize, size }`.
#[wasm_bindgen]
pub fn compute_metadata(bytes: &[u8], name: &str) -> Result<JsValue, JsValue> {
    let meta = metadata(bytes, name)
        .map_err(|e| to_js_error("compute_metadata", JsProcessError::from(&e)))?;
    serde_wasm_bindgen::to_value(&meta).map_err(JsValue::from)
}

/// Thumbnail an uploaded image.
///
/// `width_hint` is the width the caller already knows for the source; when
/// omitted the header width is used.
#[wasm_bindgen]
pub fn make_thumbnail(
    bytes: &[u8],
    name: &str,
    width_hint: Option<u32>,
) -> Result<JsProcessedImage, JsValue> {
    thumbnail(bytes, name, width_hint)
        .map(JsProcessedImage::from)
        .map_err(|e| to_js_error("make_thumbnail", JsProcessError::from(&e)))
}

/// Tile the installed watermark over an uploaded image.
#[wasm_bindgen]
pub fn make_watermarked(bytes: &[u8], name: &str) -> Result<JsProcessedImage, JsValue> {
    watermarked(bytes, name)
        .map(JsProcessedImage::from)
        .map_err(|e| to_js_error("make_watermarked", JsProcessError::from(&e)))
}

fn processor() -> ImageProcessor {
    let processor = ImageProcessor::new(ProcessorConfig::default());
    match WatermarkMark::global() {
        Some(mark) => processor.with_mark(mark),
        None => processor,
    }
}

fn install_mark(bytes: &[u8]) -> Result<(), MarkError> {
    WatermarkMark::install_global(WatermarkMark::from_bytes(bytes)?);
    Ok(())
}

fn metadata(bytes: &[u8], name: &str) -> Result<ImageMetadata, ProcessError> {
    processor().compute_metadata(&ImageRequest::new(bytes, name))
}

fn thumbnail(bytes: &[u8], name: &str, width_hint: Option<u32>) -> Result<ProcessedImage, ProcessError> {
    let request = ImageRequest::new(bytes, name).with_width_hint(width_hint);
    processor().make_thumbnail(&request)
}

fn watermarked(bytes: &[u8], name: &str) -> Result<ProcessedImage, ProcessError> {
    processor().make_watermarked(&ImageRequest::new(bytes, name))
}

fn to_js_error(op: &str, payload: JsProcessError) -> JsValue {
    web_sys::console::warn_1(&JsValue::from_str(&format!(
        "tessera: {op} failed ({}): {}",
        payload.kind, payload.message
    )));
    payload.into_js()
}
