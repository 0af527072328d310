//! Human and machine renderings of an [`AnalysisReport`].

use std::fmt::Write;

use serde::Serialize;

use crate::analysis::{AnalysisReport, KeySource};
use crate::config::{OutputConfig, OutputFormat};
use crate::stats::StatsResult;

/// Render `report` in the format selected by `output`.
pub fn render(report: &AnalysisReport, output: &OutputConfig) -> crate::Result<String> {
    match output.format {
        OutputFormat::Plain => Ok(render_plain(report, output.show_buckets)),
        OutputFormat::Json => render_json(report, output.show_buckets),
    }
}

/// Number of buckets to list: all when `limit` is 0, else at most `limit`.
fn bucket_limit(limit: u64, bucket_count: usize) -> usize {
    if limit == 0 {
        bucket_count
    } else {
        usize::try_from(limit).map_or(bucket_count, |l| l.min(bucket_count))
    }
}

#[must_use]
pub fn render_plain(report: &AnalysisReport, show_buckets: Option<u64>) -> String {
    let mut out = String::new();
    let stats = &report.stats;
    let cfg = &report.config;

    match &report.source {
        KeySource::Demo { end } => {
            let _ = writeln!(out, "Mode: demo");
            let _ = writeln!(out, "Range: [0, {end}) ({} samples)", stats.sample_count);
        }
        KeySource::FromFile { path } => {
            let _ = writeln!(out, "Mode: from-file");
            let _ = writeln!(out, "File: {path}");
        }
    }
    out.push('\n');

    let _ = writeln!(out, "Config:");
    let _ = writeln!(out, "  a = 0x{:X}", cfg.multiplier);
    let _ = writeln!(out, "  b = 0x{:X}", cfg.offset);
    let _ = writeln!(
        out,
        "  k = {} (buckets = {})",
        cfg.bucket_bits,
        cfg.bucket_count()
    );
    out.push('\n');

    let _ = writeln!(out, "Stats:");
    let _ = writeln!(out, "  sample_count = {}", stats.sample_count);
    let _ = writeln!(out, "  bucket_count = {}", stats.bucket_count);
    let _ = writeln!(out, "  mean         = {:.4}", stats.mean);
    let _ = writeln!(out, "  stddev       = {:.4}", stats.stddev);
    let _ = writeln!(out, "  chi2         = {:.4}", stats.chi2);
    let _ = writeln!(out, "  uniformity   = {:.4} %", stats.uniformity_percent);

    if let Some(limit) = show_buckets {
        let shown = bucket_limit(limit, report.counts.len());
        let _ = writeln!(out, "\nBucket counts (first {shown}):");
        for (i, count) in report.counts.iter().take(shown).enumerate() {
            let _ = writeln!(out, "  [{i}] = {count}");
        }
    }

    out
}

#[derive(Serialize)]
struct JsonConfig {
    multiplier: String,
    offset: String,
    bucket_bits: u32,
    bucket_count: u64,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    source: &'a KeySource,
    config: JsonConfig,
    stats: &'a StatsResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    buckets: Option<&'a [u64]>,
}

/// Pretty-printed JSON. Affine constants are rendered as `0x` hex strings.
pub fn render_json(report: &AnalysisReport, show_buckets: Option<u64>) -> crate::Result<String> {
    let cfg = &report.config;
    let view = JsonReport {
        source: &report.source,
        config: JsonConfig {
            multiplier: format!("0x{:08X}", cfg.multiplier),
            offset: format!("0x{:08X}", cfg.offset),
            bucket_bits: cfg.bucket_bits,
            bucket_count: cfg.bucket_count(),
        },
        stats: &report.stats,
        buckets: show_buckets
            .map(|limit| &report.counts[..bucket_limit(limit, report.counts.len())]),
    };
    Ok(serde_json::to_string_pretty(&view)?)
}
