//! The avatar derivation pipeline.
//!
//! Takes one source image and produces the fixed variant set:
//!
//! ```text
//! output_dir/
//! ├── <stem>_small.png     # 64×64, Lanczos3, PNG at max compression
//! ├── <stem>_small.webp    # the same 64×64 bitmap, WebP quality 85
//! └── <stem>_medium.png    # 128×128 from the original, PNG at max compression
//! ```
//!
//! ## Run Shape
//!
//! Preflight (input exists, encoders compiled in, output dir created), then
//! decode once, then sequential derivation. The decoded bitmap lives on this
//! function's stack and is released when it returns, error paths included.
//!
//! ## Failure Semantics
//!
//! A failed step aborts the remaining ones. Files written by earlier steps
//! are left in place — re-running the tool overwrites them. Nothing is
//! written before the first preflight check passes.

use crate::config::JobConfig;
use crate::imaging::{
    BackendError, DeriveConfig, GeneratedVariant, ImageBackend, Quality, SourceInfo,
    derive_variants,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
    #[error("Source image not found: {0}")]
    SourceNotFound(PathBuf),
    #[error("{format} encoder not available in this build")]
    CodecUnavailable { format: &'static str },
    #[error("Input path has no usable file name: {0}")]
    BadSourceName(PathBuf),
}

/// Everything a run needs, resolved from config + CLI flags.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub derive: DeriveConfig,
}

impl RunConfig {
    pub fn from_job(job: &JobConfig) -> Self {
        Self {
            input: job.input.clone(),
            output_dir: job.output_dir.clone(),
            derive: DeriveConfig {
                small_size: job.sizes.small,
                medium_size: job.sizes.medium,
                webp_quality: Quality::new(job.encoding.webp_quality),
            },
        }
    }
}

/// Progress events emitted during a run, printed as they arrive.
#[derive(Debug, Clone)]
pub enum ProcessEvent {
    SourceLoaded(SourceInfo),
    VariantWritten(GeneratedVariant),
}

/// Summary of a completed run.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub source: SourceInfo,
    pub variants: Vec<GeneratedVariant>,
}

/// Run the full pipeline for one source image.
///
/// Events are sent on `progress` as each step completes; pass `None` when
/// only the final [`RunReport`] matters (e.g. `--json`).
pub fn run<B: ImageBackend>(
    backend: &B,
    config: &RunConfig,
    progress: Option<Sender<ProcessEvent>>,
) -> Result<RunReport, ProcessError> {
    if !config.input.exists() {
        return Err(ProcessError::SourceNotFound(config.input.clone()));
    }
    let stem = source_stem(&config.input)?;

    // Encoder availability is checked before anything touches the disk.
    let codecs = backend.codecs();
    for encoding in config.derive.required_encodings() {
        if !codecs.supports(encoding) {
            return Err(ProcessError::CodecUnavailable {
                format: encoding.format_name(),
            });
        }
    }

    std::fs::create_dir_all(&config.output_dir)?;

    let (image, source) = backend.load(&config.input)?;
    emit(&progress, ProcessEvent::SourceLoaded(source.clone()));

    let variants = derive_variants(
        backend,
        &image,
        &config.output_dir,
        &stem,
        &config.derive,
        |variant| emit(&progress, ProcessEvent::VariantWritten(variant.clone())),
    )?;

    Ok(RunReport { source, variants })
}

fn emit(progress: &Option<Sender<ProcessEvent>>, event: ProcessEvent) {
    if let Some(tx) = progress {
        // A hung-up printer is not a pipeline failure.
        let _ = tx.send(event);
    }
}

/// Output names derive from the input stem: `author_img.png` →
/// `author_img_small.png` and friends.
fn source_stem(input: &Path) -> Result<String, ProcessError> {
    input
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ProcessError::BadSourceName(input.to_path_buf()))
}
