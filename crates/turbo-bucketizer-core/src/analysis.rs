//! End-to-end analysis runs: pick a key source, bucket it, summarize it.

use std::path::Path;

use serde::Serialize;

use crate::config::BucketConfig;
use crate::engine::{BucketEngine, Histogram, Key};
use crate::error::InputError;
use crate::input::load_keys;
use crate::stats::{StatsResult, compute_stats};

/// Size of the full 32-bit key space.
pub const KEY_SPACE: u64 = 1 << 32;

/// Where the analyzed keys came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum KeySource {
    /// The dense range `[0, end)`.
    Demo { end: u64 },
    /// Addresses read from a file.
    FromFile { path: String },
}

/// Result of one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub source: KeySource,
    pub config: BucketConfig,
    pub stats: StatsResult,
    pub counts: Histogram,
}

/// Analyze the synthetic range `[0, count)`, clamped to the 32-bit key space.
pub fn run_demo(config: &BucketConfig, count: u64) -> crate::Result<AnalysisReport> {
    if count == 0 {
        return Err(InputError::EmptyDemo.into());
    }

    let end = count.min(KEY_SPACE);
    if end < count {
        tracing::warn!(requested = count, clamped = end, "Demo count exceeds key space");
    }

    let engine = BucketEngine::new(*config);
    let counts = engine.distribution_span(0, end);
    Ok(summarize(KeySource::Demo { end }, config, counts))
}

/// Analyze the addresses listed in the file at `path`.
pub fn run_from_file(config: &BucketConfig, path: &Path) -> crate::Result<AnalysisReport> {
    let keys = load_keys(path)?;
    Ok(analyze_keys(
        config,
        &keys,
        KeySource::FromFile {
            path: path.display().to_string(),
        },
    ))
}

/// Analyze an already-materialized key list.
#[must_use]
pub fn analyze_keys(config: &BucketConfig, keys: &[Key], source: KeySource) -> AnalysisReport {
    let engine = BucketEngine::new(*config);
    let counts = engine.distribution(keys);
    summarize(source, config, counts)
}

fn summarize(source: KeySource, config: &BucketConfig, counts: Histogram) -> AnalysisReport {
    let stats = compute_stats(&counts);
    tracing::info!(
        samples = stats.sample_count,
        buckets = stats.bucket_count,
        chi2 = stats.chi2,
        uniformity = stats.uniformity_percent,
        "Analysis complete"
    );
    AnalysisReport {
        source,
        config: *config,
        stats,
        counts,
    }
}
