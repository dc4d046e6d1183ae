//! Image processing — pure Rust plus statically linked libwebp.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (format sniffed from content) |
//! | **Resize** | `resize_exact` with Lanczos3 |
//! | **Encode → PNG** | `PngEncoder` at `CompressionType::Best` |
//! | **Encode → WebP** | `webp::Encoder` (lossy, quality 85 by default) |
//!
//! The module is split into:
//! - **Parameters**: Data structures describing encodes ([`Quality`], [`Encoding`])
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: The fixed variant plan and decode-once derivation

pub mod backend;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, CodecSupport, ImageBackend, SourceInfo};
pub use operations::{DeriveConfig, GeneratedVariant, VariantKind, derive_variants};
pub use params::{Encoding, Quality};
pub use rust_backend::RustBackend;
