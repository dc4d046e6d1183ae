//! CLI output formatting.
//!
//! Each line type has a pure `format_*` function (testable, no I/O) and the
//! binary prints whatever those return. The wording is stable — scripts in
//! the wild grep for `Original size:` and the `Created … version:` lines.
//!
//! ```text
//! Original size: (512, 512), format: PNG
//! Created small version: img/author_img_small.png (2842 bytes)
//! Created WebP version: img/author_img_small.webp (1298 bytes)
//! Created medium version: img/author_img_medium.png (8561 bytes)
//! Image optimization completed successfully!
//! ```

use crate::imaging::{GeneratedVariant, SourceInfo, VariantKind};
use crate::process::{ProcessError, ProcessEvent};

/// Format the source line shown right after decoding.
pub fn format_source_line(source: &SourceInfo) -> String {
    format!(
        "Original size: ({}, {}), format: {}",
        source.width,
        source.height,
        source.format.as_deref().unwrap_or("unknown")
    )
}

/// Format the per-variant line shown after each write.
pub fn format_variant_line(variant: &GeneratedVariant) -> String {
    let label = match variant.kind {
        VariantKind::SmallPng => "small version",
        VariantKind::SmallWebp => "WebP version",
        VariantKind::MediumPng => "medium version",
    };
    format!(
        "Created {}: {} ({} bytes)",
        label,
        variant.path.display(),
        variant.bytes
    )
}

/// Format a progress event as a display line.
pub fn format_event(event: &ProcessEvent) -> String {
    match event {
        ProcessEvent::SourceLoaded(source) => format_source_line(source),
        ProcessEvent::VariantWritten(variant) => format_variant_line(variant),
    }
}

/// Print a progress event to stdout.
pub fn print_event(event: &ProcessEvent) {
    println!("{}", format_event(event));
}

/// The success line printed when all variants were written.
pub fn format_completion() -> &'static str {
    "Image optimization completed successfully!"
}

/// One human-readable line per recognized failure kind.
///
/// A missing input and a missing encoder each get a specific message; any
/// other failure surfaces its underlying message.
pub fn format_run_error(err: &ProcessError) -> String {
    match err {
        ProcessError::SourceNotFound(path) => {
            format!("Error: {} not found", path.display())
        }
        ProcessError::CodecUnavailable { format } => format!(
            "{format} encoder not available in this build. \
             Rebuild with the matching image codec feature enabled."
        ),
        other => format!("Error: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::BackendError;
    use std::path::PathBuf;

    fn variant(kind: VariantKind, name: &str, bytes: u64) -> GeneratedVariant {
        GeneratedVariant {
            kind,
            path: PathBuf::from("img").join(name),
            width: 64,
            height: 64,
            bytes,
        }
    }

    #[test]
    fn source_line_matches_stable_wording() {
        let line = format_source_line(&SourceInfo {
            width: 512,
            height: 512,
            format: Some("PNG".to_string()),
        });
        assert_eq!(line, "Original size: (512, 512), format: PNG");
    }

    #[test]
    fn source_line_without_format_tag() {
        let line = format_source_line(&SourceInfo {
            width: 100,
            height: 80,
            format: None,
        });
        assert_eq!(line, "Original size: (100, 80), format: unknown");
    }

    #[test]
    fn variant_lines_per_kind() {
        assert_eq!(
            format_variant_line(&variant(VariantKind::SmallPng, "a_small.png", 2842)),
            "Created small version: img/a_small.png (2842 bytes)"
        );
        assert_eq!(
            format_variant_line(&variant(VariantKind::SmallWebp, "a_small.webp", 1298)),
            "Created WebP version: img/a_small.webp (1298 bytes)"
        );
        assert_eq!(
            format_variant_line(&variant(VariantKind::MediumPng, "a_medium.png", 8561)),
            "Created medium version: img/a_medium.png (8561 bytes)"
        );
    }

    #[test]
    fn not_found_error_names_the_path() {
        let line = format_run_error(&ProcessError::SourceNotFound(PathBuf::from(
            "img/author_img.png",
        )));
        assert_eq!(line, "Error: img/author_img.png not found");
    }

    #[test]
    fn codec_error_carries_an_install_hint() {
        let line = format_run_error(&ProcessError::CodecUnavailable { format: "WebP" });
        assert!(line.starts_with("WebP encoder not available"));
        assert!(line.contains("Rebuild"));
    }

    #[test]
    fn generic_errors_surface_their_message() {
        let err = ProcessError::Imaging(BackendError::ProcessingFailed(
            "Failed to decode img/author_img.png".to_string(),
        ));
        let line = format_run_error(&err);
        assert!(line.starts_with("Error: "));
        assert!(line.contains("Failed to decode"));
    }
}
