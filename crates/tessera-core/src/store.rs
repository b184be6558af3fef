//! Byte sources and sinks around the processor.
//!
//! The core never performs I/O itself. A [`Pipeline`] reads the source object
//! from a [`ByteSource`], runs one operation and hands the derivative to a
//! [`ByteSink`]. Bucket-backed and upload-backed transports only need to
//! implement these two traits.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::error::ProcessError;
use crate::metadata::ImageMetadata;
use crate::processor::ImageProcessor;
use crate::{ImageRequest, ProcessedImage};

/// Errors raised by a storage collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid object key {0:?}")]
    InvalidKey(String),

    #[error("Storage I/O error for {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// Something the source bytes can be read from.
pub trait ByteSource {
    fn read(&self, key: &str) -> Result<Vec<u8>, StoreError>;
}

/// Something derivatives can be written to.
///
/// A failed write must not leave a partial object under `key`.
pub trait ByteSink {
    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError>;
}

impl<T: ByteSource + ?Sized> ByteSource for &T {
    fn read(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        (**self).read(key)
    }
}

impl<T: ByteSink + ?Sized> ByteSink for &T {
    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        (**self).write(key, bytes)
    }
}

impl<T: ByteSource + ?Sized> ByteSource for Arc<T> {
    fn read(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        (**self).read(key)
    }
}

impl<T: ByteSink + ?Sized> ByteSink for Arc<T> {
    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        (**self).write(key, bytes)
    }
}

/// Thread-safe in-memory object store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, key: impl Into<String>, bytes: Vec<u8>) {
        self.lock().insert(key.into(), bytes);
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.lock().get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>> {
        // A poisoned map is still structurally valid
        self.objects.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ByteSource for MemoryStore {
    fn read(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        self.get(key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }
}

impl ByteSink for MemoryStore {
    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        self.insert(key, bytes.to_vec());
        Ok(())
    }
}

/// Object store backed by a directory; keys are relative paths.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `key` under the root, rejecting absolute and escaping keys.
    fn resolve(&self, key: &str) -> Result<PathBuf, StoreError> {
        let relative = Path::new(key);
        let valid = !key.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

impl ByteSource for DirStore {
    fn read(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        let path = self.resolve(key)?;
        std::fs::read(&path).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => StoreError::NotFound(key.to_string()),
            _ => StoreError::Io {
                key: key.to_string(),
                source,
            },
        })
    }
}

impl ByteSink for DirStore {
    /// Write through a temporary file in the target directory, then rename it
    /// into place.
    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let path = self.resolve(key)?;
        let io = |source: std::io::Error| StoreError::Io {
            key: key.to_string(),
            source,
        };

        let dir = path.parent().unwrap_or(self.root.as_path());
        std::fs::create_dir_all(dir).map_err(io)?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(io)?;
        tmp.write_all(bytes).map_err(io)?;
        tmp.as_file().sync_all().map_err(io)?;
        tmp.persist(&path).map_err(|e| io(e.error))?;

        tracing::debug!(key, len = bytes.len(), "stored object");
        Ok(())
    }
}

/// A storage or processing failure.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Process(#[from] ProcessError),
}

impl PipelineError {
    /// Stable category for transport responses.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Store(_) => "storage_error",
            PipelineError::Process(e) => e.kind().as_str(),
        }
    }
}

/// Source -> processor -> sink wiring shared by every transport.
#[derive(Debug, Clone)]
pub struct Pipeline<S, K> {
    processor: ImageProcessor,
    source: S,
    sink: K,
}

impl<S: ByteSource, K: ByteSink> Pipeline<S, K> {
    pub fn new(processor: ImageProcessor, source: S, sink: K) -> Self {
        Self {
            processor,
            source,
            sink,
        }
    }

    pub fn processor(&self) -> &ImageProcessor {
        &self.processor
    }

    /// Metadata of the object at `key`. Nothing is written.
    pub fn metadata(&self, key: &str) -> Result<ImageMetadata, PipelineError> {
        let bytes = self.source.read(key)?;
        Ok(self
            .processor
            .compute_metadata(&ImageRequest::new(&bytes, key))?)
    }

    /// Thumbnail the object at `key`. Pass-through results are not written
    /// back, since the source already holds them.
    pub fn thumbnail(&self, key: &str, width_hint: Option<u32>) -> Result<ProcessedImage, PipelineError> {
        let bytes = self.source.read(key)?;
        let request = ImageRequest::new(&bytes, key).with_width_hint(width_hint);
        let out = self.processor.make_thumbnail(&request)?;
        if out.name != key {
            self.sink.write(&out.name, &out.bytes)?;
        }
        Ok(out)
    }

    /// Watermark the object at `key` and store the derivative.
    pub fn watermark(&self, key: &str) -> Result<ProcessedImage, PipelineError> {
        let bytes = self.source.read(key)?;
        let out = self
            .processor
            .make_watermarked(&ImageRequest::new(&bytes, key))?;
        self.sink.write(&out.name, &out.bytes)?;
        Ok(out)
    }
}
