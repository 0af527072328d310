//! Distribution-quality statistics over a bucket occupancy histogram.
//!
//! All figures treat the histogram as a population: the expected count per
//! bucket is the mean, variance divides by the bucket count, and chi-square
//! is Pearson's statistic against that uniform expectation.
//!
//! Sums of squared deviations use Neumaier compensated summation so that
//! large histograms (up to `2^32` buckets) do not lose low-order bits.

use serde::{Deserialize, Serialize};

/// Aggregate statistics for one histogram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsResult {
    /// Total number of keys (sum of all counts).
    pub sample_count: u64,
    /// Number of buckets (histogram length).
    pub bucket_count: u64,
    pub mean: f64,
    /// Population standard deviation of the counts.
    pub stddev: f64,
    /// Pearson chi-square against a uniform expectation of `mean`.
    pub chi2: f64,
    /// 100 when the most extreme bucket equals the mean, 0 when it is off by
    /// the mean or more.
    #[serde(rename = "uniformity")]
    pub uniformity_percent: f64,
}

/// Compute statistics for `counts`.
///
/// An empty histogram, or one whose counts sum to zero, yields the counts
/// and zero for every derived field.
#[must_use]
pub fn compute_stats(counts: &[u64]) -> StatsResult {
    let bucket_count = counts.len() as u64;
    let sample_count: u64 = counts.iter().sum();

    let mut result = StatsResult {
        sample_count,
        bucket_count,
        ..StatsResult::default()
    };
    if bucket_count == 0 || sample_count == 0 {
        return result;
    }

    let mean = sample_count as f64 / bucket_count as f64;
    let sum_sq = NeumaierSum::accumulate(counts.iter().map(|&c| {
        let d = c as f64 - mean;
        d * d
    }));

    result.mean = mean;
    result.stddev = (sum_sq / bucket_count as f64).sqrt();
    result.chi2 = sum_sq / mean;
    result.uniformity_percent = uniformity_percent(counts, mean);
    result
}

/// Heuristic uniformity score in `[0, 100]`.
///
/// `1 - max_dev / mean`, where `max_dev` is the larger distance of the
/// fullest or emptiest bucket from the mean, clamped to `[0, 1]` and scaled.
fn uniformity_percent(counts: &[u64], mean: f64) -> f64 {
    let (Some(&min), Some(&max)) = (counts.iter().min(), counts.iter().max()) else {
        return 0.0;
    };

    let max_dev = (max as f64 - mean).abs().max((min as f64 - mean).abs());
    let u = if mean > 0.0 { 1.0 - max_dev / mean } else { 1.0 };
    u.clamp(0.0, 1.0) * 100.0
}

/// Neumaier's variant of Kahan summation.
#[derive(Debug, Default, Clone, Copy)]
struct NeumaierSum {
    sum: f64,
    compensation: f64,
}

impl NeumaierSum {
    fn add(&mut self, value: f64) {
        let t = self.sum + value;
        if self.sum.abs() >= value.abs() {
            self.compensation += (self.sum - t) + value;
        } else {
            self.compensation += (value - t) + self.sum;
        }
        self.sum = t;
    }

    fn total(self) -> f64 {
        self.sum + self.compensation
    }

    fn accumulate(values: impl IntoIterator<Item = f64>) -> f64 {
        let mut acc = Self::default();
        for v in values {
            acc.add(v);
        }
        acc.total()
    }
}
