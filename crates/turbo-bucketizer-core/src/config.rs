//! Configuration for the bucketing engine and the `tb` front end.
//!
//! [`BucketConfig`] is the only piece the engine consumes. [`FileConfig`]
//! wraps it together with logging and output settings so a `tb.toml` can
//! pin a whole run:
//!
//! ```toml
//! [bucket]
//! multiplier = 0x27D4EB2D
//! offset = 0x165667B1
//! bucket_bits = 16
//!
//! [logging]
//! level = "debug"
//! format = "json"
//!
//! [output]
//! format = "json"
//! show_buckets = 32
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::logging::LogConfig;

/// Widest supported bucket index, in bits.
pub const MAX_BUCKET_BITS: u32 = 32;

/// Affine hash parameters: `index = top_bits(multiplier * key + offset)`.
///
/// The multiplier is conventionally odd (an odd multiplier makes the affine
/// map a bijection on `u32`), but nothing here enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct BucketConfig {
    /// Affine multiplier `a`.
    pub multiplier: u32,
    /// Additive offset `b`.
    pub offset: u32,
    /// Number of high bits kept as the bucket index (`k`).
    pub bucket_bits: u32,
}

impl BucketConfig {
    pub const DEFAULT_BUCKET_BITS: u32 = 12;

    #[must_use]
    pub const fn new(multiplier: u32, offset: u32, bucket_bits: u32) -> Self {
        Self {
            multiplier,
            offset,
            bucket_bits,
        }
    }

    /// `bucket_bits` clamped to [`MAX_BUCKET_BITS`].
    #[must_use]
    pub const fn effective_bits(&self) -> u32 {
        if self.bucket_bits > MAX_BUCKET_BITS {
            MAX_BUCKET_BITS
        } else {
            self.bucket_bits
        }
    }

    /// Number of buckets, `2^bucket_bits`. Held in a `u64` so that
    /// `bucket_bits == 32` yields `2^32` instead of overflowing.
    #[must_use]
    pub const fn bucket_count(&self) -> u64 {
        1u64 << self.effective_bits()
    }

    /// Replace the affine constants with those of `preset`, keeping `bucket_bits`.
    #[must_use]
    pub const fn with_preset(self, preset: Preset) -> Self {
        let (multiplier, offset) = preset.params();
        Self {
            multiplier,
            offset,
            bucket_bits: self.bucket_bits,
        }
    }
}

impl Default for BucketConfig {
    fn default() -> Self {
        let (multiplier, offset) = Preset::Default.params();
        Self::new(multiplier, offset, Self::DEFAULT_BUCKET_BITS)
    }
}

/// Named affine constant pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Golden-ratio multiplier with a murmur3 finalizer constant as offset.
    Default,
    /// Constants from Thomas Wang's integer hash.
    Wang,
}

impl Preset {
    pub const ALL: [Self; 2] = [Self::Default, Self::Wang];

    /// `(multiplier, offset)` for this preset.
    #[must_use]
    pub const fn params(self) -> (u32, u32) {
        match self {
            Self::Default => (0x9E3779B1, 0x85EBCA77),
            Self::Wang => (0x27D4EB2D, 0x165667B1),
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Wang => "wang",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name() == s)
            .ok_or_else(|| ConfigError::UnknownPreset(s.to_string()))
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-friendly colored output
    #[default]
    Pretty,
    /// JSON lines
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pretty => f.write_str("pretty"),
            Self::Json => f.write_str("json"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(format!("unknown log format: {s}. Expected one of: pretty, json")),
        }
    }
}

/// Report output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Plain,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => f.write_str("plain"),
            Self::Json => f.write_str("json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" => Ok(Self::Plain),
            "json" => Ok(Self::Json),
            _ => Err(format!("unknown output format: {s}. Expected one of: plain, json")),
        }
    }
}

/// Report settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Per-bucket listing: `None` = off, `Some(0)` = all buckets, `Some(n)` = first n.
    pub show_buckets: Option<u64>,
}

/// Contents of a `tb.toml` file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub bucket: BucketConfig,
    pub logging: LogConfig,
    pub output: OutputConfig,
}

impl FileConfig {
    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()).into());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadFailed(path.display().to_string(), e.to_string()))?;
        let config = Self::from_toml_str(&content)?;

        tracing::debug!(
            path = %path.display(),
            bucket_bits = config.bucket.bucket_bits,
            "Loaded config file"
        );
        Ok(config)
    }

    /// Parse and validate TOML content.
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bucket.bucket_bits > MAX_BUCKET_BITS {
            return Err(ConfigError::ValidationError(format!(
                "bucket_bits must be <= {MAX_BUCKET_BITS}, got {}",
                self.bucket.bucket_bits
            )));
        }
        Ok(())
    }
}
