//! Tessera CLI: run one derivative operation against a directory-backed store.
//!
//! Object keys are paths relative to `--store-dir`. Derivatives are written
//! next to their source and the result is printed as JSON on stdout.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tessera_cli::{
    build_processor, execute, init_tracing, resolve_config, to_json, ErrorResponse, Operation,
    Overrides,
};
use tessera_core::{DirStore, Pipeline};

#[derive(Parser)]
#[command(name = "tessera", about = "Image metadata, thumbnails and watermarks")]
struct Cli {
    /// Root directory of the object store
    #[arg(long, env = "TESSERA_STORE_DIR", default_value = ".")]
    store_dir: PathBuf,

    /// TOML file with processor settings
    #[arg(long, env = "TESSERA_CONFIG")]
    config: Option<PathBuf>,

    /// JPEG quality for re-encoded derivatives (1-100)
    #[arg(long, env = "TESSERA_QUALITY")]
    quality: Option<u8>,

    /// Watermark PNG asset
    #[arg(long, env = "TESSERA_WATERMARK")]
    watermark: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print width, height and human-readable size
    Meta {
        /// Object key
        key: String,
    },
    /// Write a 400x300 thumbnail unless the source is already wide
    Thumbnail {
        /// Object key
        key: String,
        /// Known source width; defaults to the header width
        #[arg(long)]
        width: Option<u32>,
    },
    /// Write a watermarked copy
    Watermark {
        /// Object key
        key: String,
    },
}

impl Commands {
    fn split(self) -> (String, Operation) {
        match self {
            Commands::Meta { key } => (key, Operation::Metadata),
            Commands::Thumbnail { key, width } => (key, Operation::Thumbnail { width_hint: width }),
            Commands::Watermark { key } => (key, Operation::Watermark),
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    let config = resolve_config(
        cli.config.as_deref(),
        Overrides {
            quality: cli.quality,
            watermark: cli.watermark,
        },
    )?;
    let (key, op) = cli.command.split();

    let processor = match build_processor(config, op.needs_mark()) {
        Ok(processor) => processor,
        Err(e) => {
            tracing::error!(error = %e, "failed to load watermark");
            println!("{}", to_json(&ErrorResponse::from(&e))?);
            return Ok(ExitCode::FAILURE);
        }
    };

    let store = DirStore::new(cli.store_dir);
    let pipeline = Pipeline::new(processor, &store, &store);

    match execute(&pipeline, &key, op) {
        Ok(response) => {
            println!("{}", to_json(&response)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::warn!(key = %key, kind = e.kind(), error = %e, "operation failed");
            println!("{}", to_json(&ErrorResponse::from(&e))?);
            Ok(ExitCode::FAILURE)
        }
    }
}
