//! Parameter types for image operations.
//!
//! These types describe *what* to encode, not *how*. They are the interface
//! between the high-level [`operations`](super::operations) module (which
//! decides which variants to create) and the [`backend`](super::backend)
//! (which does the actual pixel work), so backends can be swapped for a mock
//! in tests without changing derivation logic.

use serde::Serialize;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quality(u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(85)
    }
}

/// Target encoding for a derived image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Lossless PNG at maximum compression effort (the "optimize" flag).
    Png,
    /// Lossy WebP at the given quality.
    Webp { quality: Quality },
}

impl Encoding {
    pub fn extension(self) -> &'static str {
        match self {
            Encoding::Png => "png",
            Encoding::Webp { .. } => "webp",
        }
    }

    /// Display name used in capability errors and progress lines.
    pub fn format_name(self) -> &'static str {
        match self {
            Encoding::Png => "PNG",
            Encoding::Webp { .. } => "WebP",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0).value(), 1);
        assert_eq!(Quality::new(85).value(), 85);
        assert_eq!(Quality::new(150).value(), 100);
    }

    #[test]
    fn quality_default_is_85() {
        assert_eq!(Quality::default().value(), 85);
    }

    #[test]
    fn encoding_extensions() {
        assert_eq!(Encoding::Png.extension(), "png");
        assert_eq!(
            Encoding::Webp {
                quality: Quality::default()
            }
            .extension(),
            "webp"
        );
    }

    #[test]
    fn encoding_format_names() {
        assert_eq!(Encoding::Png.format_name(), "PNG");
        assert_eq!(
            Encoding::Webp {
                quality: Quality::new(85)
            }
            .format_name(),
            "WebP"
        );
    }
}
