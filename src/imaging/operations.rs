//! High-level derivation of the avatar variant set.
//!
//! Combines naming, the fixed variant plan, and backend execution. Works
//! against any [`ImageBackend`], so the sequencing logic is tested with a
//! recording mock.

use super::backend::{BackendError, ImageBackend};
use super::params::{Encoding, Quality};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// The three fixed variants every run produces, in derivation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantKind {
    SmallPng,
    SmallWebp,
    MediumPng,
}

impl VariantKind {
    /// Output file name for a given input stem
    /// (`author_img` → `author_img_small.webp`).
    pub fn file_name(self, stem: &str) -> String {
        match self {
            VariantKind::SmallPng => format!("{stem}_small.png"),
            VariantKind::SmallWebp => format!("{stem}_small.webp"),
            VariantKind::MediumPng => format!("{stem}_medium.png"),
        }
    }
}

/// A variant that was written to disk.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedVariant {
    pub kind: VariantKind,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub bytes: u64,
}

/// Configuration for variant derivation.
#[derive(Debug, Clone, Copy)]
pub struct DeriveConfig {
    /// Edge length of the small (64×64 by default) variants.
    pub small_size: u32,
    /// Edge length of the medium (128×128 by default) variant.
    pub medium_size: u32,
    pub webp_quality: Quality,
}

impl Default for DeriveConfig {
    fn default() -> Self {
        Self {
            small_size: 64,
            medium_size: 128,
            webp_quality: Quality::default(),
        }
    }
}

impl DeriveConfig {
    /// The encodings a run needs, for the preflight codec check.
    pub fn required_encodings(&self) -> [Encoding; 2] {
        [
            Encoding::Png,
            Encoding::Webp {
                quality: self.webp_quality,
            },
        ]
    }
}

/// Derive the full avatar variant set from an already-decoded source image.
///
/// Sequential and best-effort: an encode failure aborts the remaining steps,
/// but files already written stay in place. `on_variant` fires after each
/// successful write, in order.
///
/// The small PNG and the small WebP share one resized bitmap; the medium
/// variant resizes from the original again rather than upscaling artifacts
/// out of the small copy.
pub fn derive_variants<B: ImageBackend>(
    backend: &B,
    source: &B::Image,
    output_dir: &Path,
    stem: &str,
    config: &DeriveConfig,
    mut on_variant: impl FnMut(&GeneratedVariant),
) -> Result<Vec<GeneratedVariant>> {
    let mut generated = Vec::with_capacity(3);
    let mut write = |image: &B::Image, kind: VariantKind, size: u32, encoding: Encoding| {
        let path = output_dir.join(kind.file_name(stem));
        let bytes = backend.encode(image, &path, encoding)?;
        let variant = GeneratedVariant {
            kind,
            path,
            width: size,
            height: size,
            bytes,
        };
        on_variant(&variant);
        generated.push(variant);
        Ok::<(), BackendError>(())
    };

    let small = backend.resize(source, config.small_size, config.small_size);
    write(&small, VariantKind::SmallPng, config.small_size, Encoding::Png)?;
    write(
        &small,
        VariantKind::SmallWebp,
        config.small_size,
        Encoding::Webp {
            quality: config.webp_quality,
        },
    )?;

    let medium = backend.resize(source, config.medium_size, config.medium_size);
    write(&medium, VariantKind::MediumPng, config.medium_size, Encoding::Png)?;

    Ok(generated)
}
