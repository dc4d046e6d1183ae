//! Job configuration module.
//!
//! Handles loading and validating `avatar.toml`. Configuration is sparse:
//! stock defaults are overridden by whatever keys the file specifies, and
//! CLI flags override both.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! # Source portrait image
//! input = "khimoo-portfolio/articles/img/author_img.png"
//!
//! # Directory the derived assets are written to
//! output_dir = "khimoo-portfolio/articles/img"
//!
//! [sizes]
//! small = 64        # Edge length of the small PNG + WebP variants
//! medium = 128      # Edge length of the medium PNG variant
//!
//! [encoding]
//! webp_quality = 85 # WebP quality (1-100); PNG is always lossless
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Job configuration loaded from `avatar.toml`.
///
/// All fields have defaults reproducing the stock invocation. User config
/// files need only specify the values they want to override.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobConfig {
    /// Source portrait image.
    pub input: PathBuf,
    /// Directory the derived assets are written to.
    pub output_dir: PathBuf,
    /// Variant edge lengths.
    pub sizes: SizesConfig,
    /// Encoder settings.
    pub encoding: EncodingConfig,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("khimoo-portfolio/articles/img/author_img.png"),
            output_dir: PathBuf::from("khimoo-portfolio/articles/img"),
            sizes: SizesConfig::default(),
            encoding: EncodingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SizesConfig {
    pub small: u32,
    pub medium: u32,
}

impl Default for SizesConfig {
    fn default() -> Self {
        Self {
            small: 64,
            medium: 128,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncodingConfig {
    pub webp_quality: u32,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self { webp_quality: 85 }
    }
}

impl JobConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sizes.small == 0 || self.sizes.medium == 0 {
            return Err(ConfigError::Validation(
                "sizes.small and sizes.medium must be non-zero".into(),
            ));
        }
        if self.encoding.webp_quality == 0 || self.encoding.webp_quality > 100 {
            return Err(ConfigError::Validation(
                "encoding.webp_quality must be 1-100".into(),
            ));
        }
        Ok(())
    }
}

/// Load and validate a config file.
pub fn load(path: &Path) -> Result<JobConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: JobConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Load `path` if it exists, otherwise fall back to stock defaults.
pub fn load_optional(path: &Path) -> Result<JobConfig, ConfigError> {
    if path.exists() {
        load(path)
    } else {
        Ok(JobConfig::default())
    }
}

/// A stock `avatar.toml` with every option documented, for `--gen-config`.
pub fn stock_config_toml() -> &'static str {
    r#"# avatarize configuration
# All options are optional - defaults shown below.

# Source portrait image
input = "khimoo-portfolio/articles/img/author_img.png"

# Directory the derived assets are written to
output_dir = "khimoo-portfolio/articles/img"

[sizes]
small = 64        # Edge length of the small PNG + WebP variants
medium = 128      # Edge length of the medium PNG variant

[encoding]
webp_quality = 85 # WebP quality (1-100); PNG is always lossless
"#
}
