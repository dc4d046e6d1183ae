//! # Avatarize
//!
//! Derives a fixed set of avatar assets from a single portrait image:
//! a 64×64 PNG, a 64×64 WebP, and a 128×128 PNG, written next to each other
//! in an output directory. One image in, three files out — the whole run
//! completes in well under a second for typical inputs.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `avatar.toml` loading and validation — input path, output dir, sizes, WebP quality |
//! | [`imaging`] | Pure-Rust image operations: decode, Lanczos resize, PNG/WebP encoding |
//! | [`process`] | The pipeline: preflight checks, decode-once derivation, progress events |
//! | [`output`] | CLI output formatting — pure `format_*` functions plus `print_*` wrappers |
//!
//! # Design Decisions
//!
//! ## Decode Once
//!
//! The source image is decoded exactly once and held for the duration of the
//! run. Both PNG variants resize from the original bitmap (the 128×128 is
//! *not* an upscale of the 64×64), and the WebP re-encodes the same 64×64
//! bitmap as the small PNG. Ownership scoping releases the decoded image when
//! [`process::run`] returns, on error paths included.
//!
//! ## Fixed Resampling Policy
//!
//! All resizes use Lanczos3. It is the right filter for aggressive downscales
//! of photographic content and the output is deterministic, so repeat runs
//! produce byte-identical files. The filter is deliberately not configurable.
//!
//! ## Partial Outputs Stay
//!
//! Derivation is sequential and best-effort: an encode failure aborts the
//! remaining steps but never deletes files already written. A half-finished
//! run leaves valid assets behind; re-running overwrites them.
//!
//! ## Pure-Rust Imaging (No ImageMagick)
//!
//! The [`imaging`] module uses the `image` crate for decoding, resampling,
//! and PNG encoding, and `libwebp` (via the `webp` crate) for lossy WebP.
//! No system binaries are consulted; the binary is self-contained.
//!
//! ## Backend Trait
//!
//! Pixel work sits behind the [`imaging::ImageBackend`] trait so pipeline
//! logic is tested against a recording mock instead of real encoders. The
//! trait also answers codec-capability queries, which is how a build missing
//! an encoder turns into a clean error instead of a mid-run failure.

pub mod config;
pub mod imaging;
pub mod output;
pub mod process;
