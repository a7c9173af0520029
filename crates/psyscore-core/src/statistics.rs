//! Descriptive statistics over participant scores.
//!
//! Values are kept at full precision; [`DescriptiveStats::rounded`] produces
//! the two-decimal form used at presentation boundaries.

use serde::{Deserialize, Serialize};

/// Sample statistics for one numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    /// Number of observations.
    pub n: usize,
    pub mean: f64,
    /// Population standard deviation (divisor `n`).
    pub sd: f64,
    pub min: f64,
    pub max: f64,
    /// Average of the two middle elements for even `n`.
    pub median: f64,
    /// Element at `floor(n × 0.25)` of the sorted sample.
    pub q1: f64,
    /// Element at `floor(n × 0.75)` of the sorted sample.
    pub q3: f64,
    /// `max - min`.
    pub range: f64,
}

/// Compute descriptive statistics. Returns `None` for an empty sample.
pub fn describe(values: &[f64]) -> Option<DescriptiveStats> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    let nf = n as f64;
    let mean = values.iter().sum::<f64>() / nf;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / nf;
    let sd = variance.sqrt();

    let min = sorted[0];
    let max = sorted[n - 1];

    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };

    let q1 = sorted[(nf * 0.25).floor() as usize];
    let q3 = sorted[(nf * 0.75).floor() as usize];

    Some(DescriptiveStats {
        n,
        mean,
        sd,
        min,
        max,
        median,
        q1,
        q3,
        range: max - min,
    })
}

/// Convenience for integer score columns.
pub fn describe_scores<T>(values: &[T]) -> Option<DescriptiveStats>
where
    T: Copy + Into<f64>,
{
    let floats: Vec<f64> = values.iter().map(|&v| v.into()).collect();
    describe(&floats)
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl DescriptiveStats {
    /// Copy with every float rounded to two decimals, for display.
    pub fn rounded(&self) -> DescriptiveStats {
        DescriptiveStats {
            n: self.n,
            mean: round2(self.mean),
            sd: round2(self.sd),
            min: round2(self.min),
            max: round2(self.max),
            median: round2(self.median),
            q1: round2(self.q1),
            q3: round2(self.q3),
            range: round2(self.range),
        }
    }
}
