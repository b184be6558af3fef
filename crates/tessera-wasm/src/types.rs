//! WASM-compatible wrapper types for processing results.
//!
//! Derivatives cross into JavaScript as [`JsProcessedImage`]; failures cross
//! as a plain `{ kind, message }` object built from [`JsProcessError`].

use serde::Serialize;
use tessera_core::{ErrorKind, MarkError, ProcessError, ProcessedImage};
use wasm_bindgen::prelude::*;

/// An encoded derivative returned to JavaScript.
///
/// `bytes()` copies the encoded image into a fresh `Uint8Array`, ready to be
/// wrapped in a `Blob` with `content_type` and uploaded under `name`.
#[wasm_bindgen]
pub struct JsProcessedImage {
    name: String,
    width: u32,
    height: u32,
    content_type: String,
    bytes: Vec<u8>,
}

#[wasm_bindgen]
impl JsProcessedImage {
    /// Derived object name
    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.name.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// MIME type of the encoded bytes
    #[wasm_bindgen(getter)]
    pub fn content_type(&self) -> String {
        self.content_type.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }

    /// Returns the encoded image as Uint8Array.
    ///
    /// Note: This creates a copy of the data.
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}

impl From<ProcessedImage> for JsProcessedImage {
    fn from(out: ProcessedImage) -> Self {
        Self {
            content_type: out.content_type().to_string(),
            name: out.name,
            width: out.width,
            height: out.height,
            bytes: out.bytes,
        }
    }
}

/// Error payload handed to JavaScript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct JsProcessError {
    pub kind: &'static str,
    pub message: String,
}

impl From<&ProcessError> for JsProcessError {
    fn from(err: &ProcessError) -> Self {
        Self {
            kind: err.kind().as_str(),
            message: err.to_string(),
        }
    }
}

impl From<&MarkError> for JsProcessError {
    fn from(err: &MarkError) -> Self {
        let kind = match err {
            MarkError::Decode(_) => ErrorKind::DecodeError,
            MarkError::Io { .. } | MarkError::InvalidBuffer { .. } => ErrorKind::InvalidInput,
        };
        Self {
            kind: kind.as_str(),
            message: err.to_string(),
        }
    }
}

impl JsProcessError {
    pub(crate) fn into_js(self) -> JsValue {
        // Serializing two plain fields cannot fail in practice
        serde_wasm_bindgen::to_value(&self).unwrap_or_else(|_| JsValue::from_str(&self.message))
    }
}
