//! Descriptive statistics for reporting.

use super::trend::population_std;
use super::Metric;
use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};

/// Distribution summary of a sample sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
    pub p95: f64,
    pub p99: f64,
}

impl SummaryStats {
    /// Summarise `samples`. Callers validate finiteness first.
    pub fn compute(samples: &[f64]) -> Result<Self> {
        if samples.is_empty() {
            return Err(AnalysisError::insufficient(Metric::Bias, 1, 0));
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);

        Ok(Self {
            count: samples.len(),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            mean: super::trend::bias(samples)?,
            std: population_std(samples),
            p25: percentile(&sorted, 25.0),
            p50: percentile(&sorted, 50.0),
            p75: percentile(&sorted, 75.0),
            p90: percentile(&sorted, 90.0),
            p95: percentile(&sorted, 95.0),
            p99: percentile(&sorted, 99.0),
        })
    }

    /// Spread between the 25th and 75th percentile.
    pub fn iqr(&self) -> f64 {
        self.p75 - self.p25
    }
}

/// Linearly interpolated percentile of an ascending slice.
pub fn percentile(sorted: &[f64], pct: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let rank = (pct.clamp(0.0, 100.0) / 100.0) * (n - 1) as f64;
            let lo = rank.floor() as usize;
            let hi = rank.ceil() as usize;
            let frac = rank - lo as f64;
            sorted[lo] + (sorted[hi] - sorted[lo]) * frac
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_percentile_interpolation() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile(&sorted, 0.0), 1.0);
        assert_eq!(percentile(&sorted, 50.0), 3.0);
        assert_eq!(percentile(&sorted, 100.0), 5.0);
        assert_abs_diff_eq!(percentile(&sorted, 90.0), 4.6, epsilon = 1e-12);
    }

    #[test]
    fn test_summary_unsorted_input() {
        let stats = SummaryStats::compute(&[5.0, 1.0, 4.0, 2.0, 3.0]).unwrap();
        assert_eq!(stats.count, 5);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
        assert_eq!(stats.mean, 3.0);
        assert_eq!(stats.p50, 3.0);
        assert_abs_diff_eq!(stats.std, 2.0f64.sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(stats.iqr(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_summary_single_value() {
        let stats = SummaryStats::compute(&[7.5]).unwrap();
        assert_eq!(stats.p99, 7.5);
        assert_eq!(stats.std, 0.0);
    }

    #[test]
    fn test_summary_empty() {
        assert!(SummaryStats::compute(&[]).unwrap_err().is_insufficient_data());
    }
}
