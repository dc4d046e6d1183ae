//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the four operations every backend must
//! support: load, resize, encode, and the codec capability query.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend) — pure Rust plus
//! libwebp, everything statically linked into the binary.

use super::params::Encoding;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Pixel dimensions of a bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// What the backend learned about the source image while decoding it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceInfo {
    pub width: u32,
    pub height: u32,
    /// Container format tag (`"PNG"`, `"JPEG"`, …) if it could be sniffed.
    pub format: Option<String>,
}

/// Which output codecs a backend was built with.
///
/// Decoders missing from a build surface as decode errors; encoders are
/// queried up front so a run fails before any file is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecSupport {
    pub png: bool,
    pub webp: bool,
}

impl CodecSupport {
    pub fn supports(self, encoding: Encoding) -> bool {
        match encoding {
            Encoding::Png => self.png,
            Encoding::Webp { .. } => self.webp,
        }
    }
}

/// Trait for image processing backends.
///
/// The associated `Image` type is the backend's in-memory bitmap. The
/// pipeline decodes the source once via [`load`](ImageBackend::load), holds
/// the bitmap for the whole run, and derives every output from it.
pub trait ImageBackend: Sync {
    type Image;

    /// Decode the source image, returning the bitmap and what was learned
    /// about it.
    fn load(&self, path: &Path) -> Result<(Self::Image, SourceInfo), BackendError>;

    /// Resize to exact target dimensions. Resampling policy is the
    /// backend's own (fixed, not per-call).
    fn resize(&self, image: &Self::Image, width: u32, height: u32) -> Self::Image;

    /// Encode `image` to `output`, returning the number of bytes written.
    fn encode(
        &self,
        image: &Self::Image,
        output: &Path,
        encoding: Encoding,
    ) -> Result<u64, BackendError>;

    /// Which output codecs this backend can encode with.
    fn codecs(&self) -> CodecSupport;
}
