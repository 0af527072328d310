//! Affine-hash bucketing of 32-bit keys.
//!
//! A key `x` is mapped to `y = a*x + b (mod 2^32)` and the bucket index is
//! the top `k` bits of `y`. Taking the high bits rather than `y mod 2^k`
//! sidesteps the weak low bits of multiplicative hashing.
//!
//! # Example
//! ```
//! use turbo_bucketizer_core::config::BucketConfig;
//! use turbo_bucketizer_core::engine::BucketEngine;
//!
//! let engine = BucketEngine::new(BucketConfig::new(1, 0, 4)); // 16 buckets
//! assert_eq!(engine.bucket_index(0x1000_0000), 1);
//!
//! let counts = engine.distribution_range(0, 128);
//! assert_eq!(counts.len(), 16);
//! assert_eq!(counts.iter().sum::<u64>(), 128);
//! ```

use crate::config::{BucketConfig, MAX_BUCKET_BITS};

/// A 32-bit key (an IPv4 address, or any `u32`).
pub type Key = u32;

/// Index of a bucket in `[0, bucket_count)`.
pub type BucketIndex = u32;

/// Per-bucket occupancy counts, indexed by [`BucketIndex`].
pub type Histogram = Vec<u64>;

/// Maps keys to buckets with a fixed [`BucketConfig`].
///
/// The engine owns a copy of the configuration, so later changes to the
/// caller's config do not affect it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketEngine {
    config: BucketConfig,
}

impl BucketEngine {
    #[must_use]
    pub const fn new(config: BucketConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &BucketConfig {
        &self.config
    }

    /// Number of buckets (`2^bucket_bits`, clamped at `2^32`).
    #[must_use]
    pub const fn bucket_count(&self) -> u64 {
        self.config.bucket_count()
    }

    /// Bucket for a single key.
    #[must_use]
    pub const fn bucket_index(&self, key: Key) -> BucketIndex {
        let y = self
            .config
            .multiplier
            .wrapping_mul(key)
            .wrapping_add(self.config.offset);
        high_bits(y, self.config.bucket_bits)
    }

    /// Bucket for every key, same order and length as `keys`.
    #[must_use]
    pub fn bucketize(&self, keys: &[Key]) -> Vec<BucketIndex> {
        keys.iter().map(|&key| self.bucket_index(key)).collect()
    }

    /// Occupancy histogram over an arbitrary key list.
    #[must_use]
    pub fn distribution(&self, keys: &[Key]) -> Histogram {
        let mut counts = self.empty_histogram();
        if counts.is_empty() {
            return counts;
        }

        for &key in keys {
            record(&mut counts, self.bucket_index(key));
        }

        tracing::debug!(
            keys = keys.len(),
            buckets = counts.len(),
            "Computed key-list distribution"
        );
        counts
    }

    /// Occupancy histogram over the half-open key range `[start, end)`.
    ///
    /// No wrap-around: `end <= start` is an empty range and yields all zeros.
    #[must_use]
    pub fn distribution_range(&self, start: Key, end: Key) -> Histogram {
        let len = if end > start {
            u64::from(end - start)
        } else {
            0
        };
        self.distribution_span(start, len)
    }

    /// Occupancy histogram over `len` consecutive keys starting at `start`.
    ///
    /// Unlike [`distribution_range`](Self::distribution_range) this can cover
    /// the full key space (`start = 0, len = 2^32`). The span is cut at
    /// `u32::MAX`; it never wraps.
    #[must_use]
    pub fn distribution_span(&self, start: Key, len: u64) -> Histogram {
        let mut counts = self.empty_histogram();
        if counts.is_empty() {
            return counts;
        }

        // u64 counter so that key u32::MAX is reachable without the loop wrapping.
        let first = u64::from(start);
        let last = first.saturating_add(len).min(1u64 << 32);
        for v in first..last {
            record(&mut counts, self.bucket_index(v as Key));
        }

        tracing::debug!(
            start,
            keys = last - first,
            buckets = counts.len(),
            "Computed range distribution"
        );
        counts
    }

    fn empty_histogram(&self) -> Histogram {
        let buckets = usize::try_from(self.bucket_count()).unwrap_or(usize::MAX);
        vec![0; buckets]
    }
}

/// Top `bits` bits of `y`; `bits == 0` collapses everything to bucket 0 and
/// `bits >= 32` keeps all of `y`.
const fn high_bits(y: u32, bits: u32) -> BucketIndex {
    if bits == 0 {
        return 0;
    }
    if bits >= MAX_BUCKET_BITS {
        return y;
    }
    // Shift in u64: the shift amount stays well below the operand width.
    ((y as u64) >> (MAX_BUCKET_BITS - bits)) as BucketIndex
}

/// Increment the count for `index`. An out-of-range index means the shift
/// and the histogram size disagree; it is dropped in release builds.
fn record(counts: &mut [u64], index: BucketIndex) {
    if let Some(slot) = counts.get_mut(index as usize) {
        *slot += 1;
    } else {
        debug_assert!(
            false,
            "bucket index {index} outside histogram of {} buckets",
            counts.len()
        );
    }
}
