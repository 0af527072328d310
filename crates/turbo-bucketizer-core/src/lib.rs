//! turbo-bucketizer-core: Core library for Turbo-Bucketizer
//!
//! Assigns 32-bit keys (IPv4 addresses or any `u32`) to `2^k` buckets with an
//! affine hash and measures how evenly the buckets fill. Useful for checking
//! hash constants before using them for load balancing or sharding.
//!
//! # Architecture
//!
//! ```text
//! key file / demo range → BucketEngine → histogram → compute_stats → report
//! ```
//!
//! # Modules
//!
//! - `config`: Affine constants, presets, `tb.toml` loading
//! - `engine`: Key → bucket mapping and occupancy histograms
//! - `stats`: Mean, stddev, chi-square and uniformity of a histogram
//! - `ipv4`: Dotted-quad parsing
//! - `input`: Key files (one address per line)
//! - `analysis`: Demo and file runs
//! - `report`: Plain and JSON rendering
//! - `logging`: tracing subscriber setup
//!
//! # Safety
//!
//! This crate forbids unsafe code.

#![forbid(unsafe_code)]

pub mod analysis;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod ipv4;
pub mod logging;
pub mod report;
pub mod stats;

pub use config::{BucketConfig, Preset};
pub use engine::{BucketEngine, BucketIndex, Histogram, Key};
pub use error::{Error, Result};
pub use stats::{StatsResult, compute_stats};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
