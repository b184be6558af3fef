//! Shared pieces of the `tessera` command: configuration loading, tracing
//! setup and the JSON responses printed on stdout.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use tessera_core::{
    ByteSink, ByteSource, ImageMetadata, ImageProcessor, MarkError, Pipeline, PipelineError,
    ProcessedImage, ProcessorConfig,
};

/// Initialize tracing for the CLI. Logs go to stderr; stdout carries only the
/// JSON response.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

/// Read a `ProcessorConfig` from a TOML file. Missing keys keep their
/// defaults.
pub fn load_config(path: &Path) -> anyhow::Result<ProcessorConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("Invalid config {}", path.display()))
}

/// Flag and environment values layered over the file config.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub quality: Option<u8>,
    pub watermark: Option<PathBuf>,
}

impl Overrides {
    pub fn apply(self, mut config: ProcessorConfig) -> ProcessorConfig {
        if let Some(quality) = self.quality {
            config.jpeg_quality = quality;
        }
        if let Some(path) = self.watermark {
            config.watermark_path = path;
        }
        config
    }
}

/// Resolve the effective configuration: defaults, then `path`, then
/// `overrides`.
pub fn resolve_config(path: Option<&Path>, overrides: Overrides) -> anyhow::Result<ProcessorConfig> {
    let base = match path {
        Some(path) => load_config(path)?,
        None => ProcessorConfig::default(),
    };
    Ok(overrides.apply(base))
}

/// Build the processor; the watermark asset is only loaded when needed.
pub fn build_processor(config: ProcessorConfig, needs_mark: bool) -> Result<ImageProcessor, MarkError> {
    if needs_mark {
        ImageProcessor::from_config(config)
    } else {
        Ok(ImageProcessor::new(config))
    }
}

/// One operation against a stored object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Metadata,
    Thumbnail { width_hint: Option<u32> },
    Watermark,
}

impl Operation {
    pub fn needs_mark(self) -> bool {
        matches!(self, Operation::Watermark)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataResponse {
    pub width: u32,
    pub height: u32,
    /// Human-readable size, e.g. `"1.5 KB"`
    pub file_size: String,
}

impl From<ImageMetadata> for MetadataResponse {
    fn from(meta: ImageMetadata) -> Self {
        Self {
            width: meta.width,
            height: meta.height,
            file_size: meta.size,
        }
    }
}

/// Where a derivative was stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivativeResponse {
    pub path: String,
    pub width: u32,
    pub height: u32,
}

impl From<ProcessedImage> for DerivativeResponse {
    fn from(out: ProcessedImage) -> Self {
        Self {
            path: out.name,
            width: out.width,
            height: out.height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Metadata(MetadataResponse),
    Derivative(DerivativeResponse),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub kind: String,
    pub message: String,
}

impl From<&PipelineError> for ErrorResponse {
    fn from(err: &PipelineError) -> Self {
        Self {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<&MarkError> for ErrorResponse {
    fn from(err: &MarkError) -> Self {
        Self {
            kind: "missing_watermark".to_string(),
            message: err.to_string(),
        }
    }
}

/// Run `op` on the object at `key`.
pub fn execute<S: ByteSource, K: ByteSink>(
    pipeline: &Pipeline<S, K>,
    key: &str,
    op: Operation,
) -> Result<Response, PipelineError> {
    let response = match op {
        Operation::Metadata => Response::Metadata(pipeline.metadata(key)?.into()),
        Operation::Thumbnail { width_hint } => {
            Response::Derivative(pipeline.thumbnail(key, width_hint)?.into())
        }
        Operation::Watermark => Response::Derivative(pipeline.watermark(key)?.into()),
    };
    tracing::info!(key, ?op, "operation complete");
    Ok(response)
}

/// Pretty JSON for stdout.
pub fn to_json(value: &impl Serialize) -> anyhow::Result<String> {
    serde_json::to_string_pretty(value).context("Serialize response")
}
