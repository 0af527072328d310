//! Edge case and deterministic tests for the engine and statistics.
//!
//! Validates:
//! - bucket_bits boundaries (0, 1, 31, 32, > 32)
//! - Ranges touching the top of the key space
//! - Fixed expected buckets for the built-in presets
//! - Degenerate multipliers are accepted, not rejected
//! - The uniform 16 x 8 histogram scenario end to end

use turbo_bucketizer_core::analysis::{KEY_SPACE, KeySource, analyze_keys};
use turbo_bucketizer_core::config::{BucketConfig, Preset};
use turbo_bucketizer_core::engine::BucketEngine;
use turbo_bucketizer_core::stats::compute_stats;

// =============================================================================
// bucket_bits boundaries
// =============================================================================

#[test]
fn bucket_count_for_every_width() {
    for bits in 0..=32u32 {
        assert_eq!(BucketConfig::new(1, 0, bits).bucket_count(), 1u64 << bits);
    }
    assert_eq!(BucketConfig::new(1, 0, 32).bucket_count(), KEY_SPACE);
    assert_eq!(BucketConfig::new(1, 0, u32::MAX).bucket_count(), KEY_SPACE);
}

#[test]
fn one_bit_splits_on_top_bit() {
    let engine = BucketEngine::new(BucketConfig::new(1, 0, 1));
    assert_eq!(engine.bucket_index(0x7FFF_FFFF), 0);
    assert_eq!(engine.bucket_index(0x8000_0000), 1);
}

#[test]
fn thirty_one_bits_drops_lowest_bit() {
    let engine = BucketEngine::new(BucketConfig::new(1, 0, 31));
    assert_eq!(engine.bucket_index(0xFFFF_FFFE), 0x7FFF_FFFF);
    assert_eq!(engine.bucket_index(0xFFFF_FFFF), 0x7FFF_FFFF);
    assert_eq!(engine.bucket_index(3), 1);
}

#[test]
fn thirty_two_bits_is_raw_affine_value() {
    let engine = BucketEngine::new(BucketConfig::new(3, 1, 32));
    assert_eq!(engine.bucket_index(5), 16);
    // 3 * 0x5555_5556 = 0x1_0000_0002 -> 2, +1
    assert_eq!(engine.bucket_index(0x5555_5556), 3);
}

#[test]
fn oversized_bits_are_clamped() {
    let clamped = BucketEngine::new(BucketConfig::new(0x9E3779B1, 0x85EBCA77, 64));
    let full = BucketEngine::new(BucketConfig::new(0x9E3779B1, 0x85EBCA77, 32));
    for key in [0u32, 1, 0x7F00_0001, u32::MAX] {
        assert_eq!(clamped.bucket_index(key), full.bucket_index(key));
    }
}

// =============================================================================
// Key-space edges
// =============================================================================

#[test]
fn range_ending_at_max_key_excludes_it() {
    let engine = BucketEngine::new(BucketConfig::new(1, 0, 2));
    let counts = engine.distribution_range(u32::MAX - 4, u32::MAX);
    assert_eq!(counts, vec![0, 0, 0, 4]);
}

#[test]
fn span_includes_max_key() {
    let engine = BucketEngine::new(BucketConfig::new(1, 0, 2));
    let counts = engine.distribution_span(u32::MAX - 4, 5);
    assert_eq!(counts, vec![0, 0, 0, 5]);
}

#[test]
fn zero_length_span_is_empty() {
    let engine = BucketEngine::new(BucketConfig::new(1, 0, 3));
    assert_eq!(engine.distribution_span(17, 0), vec![0; 8]);
}

#[test]
fn offset_wraps_past_max() {
    let engine = BucketEngine::new(BucketConfig::new(1, 1, 1));
    assert_eq!(engine.bucket_index(u32::MAX), 0);
}

// =============================================================================
// Presets
// =============================================================================

#[test]
fn preset_buckets_are_stable() {
    let default = BucketEngine::new(BucketConfig::new(0, 0, 12).with_preset(Preset::Default));
    let wang = BucketEngine::new(BucketConfig::new(0, 0, 12).with_preset(Preset::Wang));

    // Key 0 maps to the offset's top 12 bits.
    assert_eq!(default.bucket_index(0), 0x85EBCA77 >> 20);
    assert_eq!(wang.bucket_index(0), 0x165667B1 >> 20);

    let key = 0xC0A8_0001u32;
    let y = 0x9E3779B1u32.wrapping_mul(key).wrapping_add(0x85EBCA77);
    assert_eq!(default.bucket_index(key), y >> 20);
}

#[test]
fn presets_differ() {
    let keys: Vec<u32> = (0..1000).collect();
    let default = BucketEngine::new(BucketConfig::default());
    let wang = BucketEngine::new(BucketConfig::default().with_preset(Preset::Wang));
    assert_ne!(default.bucketize(&keys), wang.bucketize(&keys));
}

// =============================================================================
// Degenerate constants
// =============================================================================

#[test]
fn zero_multiplier_is_accepted() {
    let engine = BucketEngine::new(BucketConfig::new(0, 0x1234_5678, 8));
    let counts = engine.distribution_range(0, 1000);
    assert_eq!(counts[0x12], 1000);

    let stats = compute_stats(&counts);
    assert_eq!(stats.sample_count, 1000);
    assert_eq!(stats.uniformity_percent, 0.0);
}

#[test]
fn even_multiplier_loses_buckets() {
    // a = 2^31 keeps only the lowest key bit, so only two of 16 buckets fill.
    let engine = BucketEngine::new(BucketConfig::new(0x8000_0000, 0, 4));
    let counts = engine.distribution_range(0, 1024);
    let occupied = counts.iter().filter(|&&c| c > 0).count();
    assert_eq!(occupied, 2);
}

// =============================================================================
// Uniform scenario end to end
// =============================================================================

#[test]
fn sixteen_buckets_of_eight() {
    let config = BucketConfig::new(0x1000_0000, 0, 4);
    let counts = BucketEngine::new(config).distribution_range(0, 128);
    assert_eq!(counts, vec![8; 16]);

    let stats = compute_stats(&counts);
    assert_eq!(stats.sample_count, 128);
    assert_eq!(stats.bucket_count, 16);
    assert!((stats.mean - 8.0).abs() < 1e-12);
    assert!(stats.stddev.abs() < 1e-9);
    assert!(stats.chi2.abs() < 1e-9);
    assert!((stats.uniformity_percent - 100.0).abs() < 1e-6);
}

#[test]
fn identity_hash_on_small_range_fills_one_bucket() {
    let report = analyze_keys(
        &BucketConfig::new(1, 0, 4),
        &(0..128).collect::<Vec<u32>>(),
        KeySource::Demo { end: 128 },
    );
    assert_eq!(report.counts[0], 128);
    assert_eq!(report.stats.uniformity_percent, 0.0);
    assert!((report.stats.chi2 - 1920.0).abs() < 1e-9);
}

#[test]
fn repeated_runs_are_bit_identical() {
    let keys: Vec<u32> = (0..10_000u32).map(|i| i.wrapping_mul(2_654_435_761)).collect();
    let engine = BucketEngine::new(BucketConfig::default());
    let a = compute_stats(&engine.distribution(&keys));
    let b = compute_stats(&engine.distribution(&keys));
    assert_eq!(a.stddev.to_bits(), b.stddev.to_bits());
    assert_eq!(a.chi2.to_bits(), b.chi2.to_bits());
    assert_eq!(a, b);
}
