//! Pure Rust image processing backend.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP) | `image` crate (pure Rust decoders) |
//! | Resize | `image::DynamicImage::resize_exact` with `Lanczos3` filter |
//! | Encode → PNG | `image::codecs::png::PngEncoder` at `CompressionType::Best` |
//! | Encode → WebP | libwebp via the `webp` crate (the `image` crate only encodes lossless WebP) |

use super::backend::{BackendError, CodecSupport, ImageBackend, SourceInfo};
use super::params::{Encoding, Quality};
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::path::Path;

/// Extensions whose decoders are compiled in and known to work.
const PHOTO_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
];

/// Returns the image file extensions that have working decoders compiled in.
pub fn supported_input_extensions() -> Vec<&'static str> {
    PHOTO_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect()
}

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Container format tag for progress reporting, matching the usual
/// uppercase convention (`PNG`, `JPEG`, …).
fn format_tag(format: ImageFormat) -> Option<&'static str> {
    match format {
        ImageFormat::Jpeg => Some("JPEG"),
        ImageFormat::Png => Some("PNG"),
        ImageFormat::Tiff => Some("TIFF"),
        ImageFormat::WebP => Some("WEBP"),
        _ => None,
    }
}

/// Encode as PNG at maximum compression effort. Lossless; the extra CPU
/// buys a smaller file.
fn save_png(img: &DynamicImage, path: &Path) -> Result<(), BackendError> {
    let file = std::fs::File::create(path).map_err(BackendError::Io)?;
    let writer = std::io::BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, CompressionType::Best, PngFilter::Adaptive);
    img.write_with_encoder(encoder)
        .map_err(|e| BackendError::ProcessingFailed(format!("PNG encode failed: {}", e)))
}

/// Encode as lossy WebP at the given quality via libwebp.
fn save_webp(img: &DynamicImage, path: &Path, quality: Quality) -> Result<(), BackendError> {
    let rgba = img.to_rgba8();
    let encoder = webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height());
    let encoded = encoder.encode(quality.value() as f32);
    std::fs::write(path, &*encoded).map_err(BackendError::Io)
}

impl ImageBackend for RustBackend {
    type Image = DynamicImage;

    fn load(&self, path: &Path) -> Result<(DynamicImage, SourceInfo), BackendError> {
        let reader = ImageReader::open(path)
            .map_err(BackendError::Io)?
            .with_guessed_format()
            .map_err(BackendError::Io)?;
        let format = reader.format();
        let img = reader.decode().map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })?;
        let info = SourceInfo {
            width: img.width(),
            height: img.height(),
            format: format.and_then(format_tag).map(str::to_string),
        };
        Ok((img, info))
    }

    fn resize(&self, image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
        // Exact target dimensions: avatar slots are square, aspect ratio is
        // deliberately not preserved.
        image.resize_exact(width, height, FilterType::Lanczos3)
    }

    fn encode(
        &self,
        image: &DynamicImage,
        output: &Path,
        encoding: Encoding,
    ) -> Result<u64, BackendError> {
        match encoding {
            Encoding::Png => save_png(image, output)?,
            Encoding::Webp { quality } => save_webp(image, output, quality)?,
        }
        Ok(std::fs::metadata(output).map_err(BackendError::Io)?.len())
    }

    fn codecs(&self) -> CodecSupport {
        CodecSupport {
            png: ImageFormat::Png.writing_enabled(),
            // libwebp is statically linked, not feature-gated.
            webp: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a small valid PNG file with the given dimensions.
    fn create_test_png(path: &Path, width: u32, height: u32) {
        let img = image::RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        img.save_with_format(path, ImageFormat::Png).unwrap();
    }

    #[test]
    fn supported_extensions_match_decodable_formats() {
        let exts = supported_input_extensions();
        for expected in &["jpg", "jpeg", "png", "tif", "tiff", "webp"] {
            assert!(
                exts.contains(expected),
                "expected {expected} in supported extensions"
            );
        }
    }

    #[test]
    fn load_reports_dimensions_and_format() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("portrait.png");
        create_test_png(&path, 200, 150);

        let backend = RustBackend::new();
        let (img, info) = backend.load(&path).unwrap();
        assert_eq!((img.width(), img.height()), (200, 150));
        assert_eq!(info.width, 200);
        assert_eq!(info.height, 150);
        assert_eq!(info.format.as_deref(), Some("PNG"));
    }

    #[test]
    fn load_sniffs_format_despite_wrong_extension() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("portrait.jpg");
        create_test_png(&path, 40, 40);

        let backend = RustBackend::new();
        let (_, info) = backend.load(&path).unwrap();
        assert_eq!(info.format.as_deref(), Some("PNG"));
    }

    #[test]
    fn load_nonexistent_file_errors() {
        let backend = RustBackend::new();
        let result = backend.load(Path::new("/nonexistent/portrait.png"));
        assert!(matches!(result, Err(BackendError::Io(_))));
    }

    #[test]
    fn load_corrupt_file_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("portrait.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let backend = RustBackend::new();
        let result = backend.load(&path);
        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
    }

    #[test]
    fn resize_produces_exact_dimensions() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("portrait.png");
        create_test_png(&path, 512, 384);

        let backend = RustBackend::new();
        let (img, _) = backend.load(&path).unwrap();
        let small = backend.resize(&img, 64, 64);
        assert_eq!((small.width(), small.height()), (64, 64));
    }

    #[test]
    fn encode_png_writes_decodable_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("portrait.png");
        create_test_png(&source, 256, 256);

        let backend = RustBackend::new();
        let (img, _) = backend.load(&source).unwrap();
        let small = backend.resize(&img, 64, 64);

        let output = tmp.path().join("portrait_small.png");
        let bytes = backend.encode(&small, &output, Encoding::Png).unwrap();
        assert_eq!(bytes, std::fs::metadata(&output).unwrap().len());

        let decoded = image::open(&output).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (64, 64));
    }

    #[test]
    fn encode_webp_writes_decodable_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("portrait.png");
        create_test_png(&source, 256, 256);

        let backend = RustBackend::new();
        let (img, _) = backend.load(&source).unwrap();
        let small = backend.resize(&img, 64, 64);

        let output = tmp.path().join("portrait_small.webp");
        let bytes = backend
            .encode(
                &small,
                &output,
                Encoding::Webp {
                    quality: Quality::new(85),
                },
            )
            .unwrap();
        assert!(bytes > 0);

        let decoded = image::open(&output).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (64, 64));
    }

    #[test]
    fn encode_is_deterministic() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("portrait.png");
        create_test_png(&source, 300, 300);

        let backend = RustBackend::new();
        let (img, _) = backend.load(&source).unwrap();
        let small = backend.resize(&img, 64, 64);

        let first = tmp.path().join("first.png");
        let second = tmp.path().join("second.png");
        backend.encode(&small, &first, Encoding::Png).unwrap();
        backend.encode(&small, &second, Encoding::Png).unwrap();
        assert_eq!(
            std::fs::read(&first).unwrap(),
            std::fs::read(&second).unwrap()
        );
    }

    #[test]
    fn codecs_report_compiled_in_encoders() {
        let support = RustBackend::new().codecs();
        assert!(support.png);
        assert!(support.webp);
    }
}
