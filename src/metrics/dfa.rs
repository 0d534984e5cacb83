//! Detrended fluctuation analysis (first order).
//!
//! The scaling exponent α of `F(s) ~ s^α` is reported as the Hurst
//! estimate: ~0.5 for uncorrelated noise, above 0.5 for persistent
//! wandering, below 0.5 for mean-reverting behaviour. A pure linear drift
//! integrates to a parabola and lands near 2.

use super::trend::{self, fit_indexed};
use super::Metric;
use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Minimum sequence length for DFA.
pub const MIN_DFA_SAMPLES: usize = 32;

/// Smallest window length.
pub const DFA_MIN_SCALE: usize = 4;

/// Largest window is `n / DFA_MAX_SCALE_DIVISOR`.
pub const DFA_MAX_SCALE_DIVISOR: usize = 4;

/// Number of log-spaced candidates before rounding and dedup.
pub const DFA_SCALE_COUNT: usize = 12;

/// Fewest distinct scales accepted for the log-log fit.
pub const DFA_MIN_SCALES: usize = 4;

/// Fluctuations below this are treated as zero.
pub const FLUCTUATION_EPSILON: f64 = 1e-9;

/// α reported for a signal with no fluctuation at any scale.
pub const FLAT_PROFILE_ALPHA: f64 = 0.5;

/// DFA output: exponent, fit quality, and the log-log points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DfaResult {
    pub alpha: f64,
    pub r2: f64,
    pub scales: Vec<f64>,
    pub fluctuations: Vec<f64>,
}

impl DfaResult {
    /// True when the profile had no fluctuation at any scale.
    pub fn is_flat(&self) -> bool {
        self.fluctuations.iter().all(|f| *f < FLUCTUATION_EPSILON)
    }
}

/// Integer window sizes, log-spaced over `[DFA_MIN_SCALE, n / 4]`.
pub fn dfa_scales(n: usize) -> Vec<usize> {
    let max_scale = n / DFA_MAX_SCALE_DIVISOR;
    if max_scale < DFA_MIN_SCALE {
        return Vec::new();
    }
    if max_scale == DFA_MIN_SCALE {
        return vec![DFA_MIN_SCALE];
    }

    let lo = (DFA_MIN_SCALE as f64).ln();
    let hi = (max_scale as f64).ln();
    let step = (hi - lo) / (DFA_SCALE_COUNT - 1) as f64;

    let mut scales: Vec<usize> = (0..DFA_SCALE_COUNT)
        .map(|k| (lo + step * k as f64).exp().round() as usize)
        .map(|s| s.clamp(DFA_MIN_SCALE, max_scale))
        .collect();
    scales.dedup();
    scales
}

/// Run DFA-1 over `samples`.
pub fn dfa(samples: &[f64]) -> Result<DfaResult> {
    let n = samples.len();
    if n < MIN_DFA_SAMPLES {
        return Err(AnalysisError::insufficient(Metric::Dfa, MIN_DFA_SAMPLES, n));
    }

    let scales = dfa_scales(n);
    if scales.len() < DFA_MIN_SCALES {
        return Err(AnalysisError::insufficient(Metric::Dfa, MIN_DFA_SAMPLES, n));
    }

    let profile = profile(samples)?;
    let fluctuations: Vec<f64> = scales.iter().map(|&s| fluctuation(&profile, s)).collect();
    let scales: Vec<f64> = scales.into_iter().map(|s| s as f64).collect();

    if fluctuations.iter().all(|f| *f < FLUCTUATION_EPSILON) {
        debug!(samples = n, "flat DFA profile, reporting neutral exponent");
        return Ok(DfaResult {
            alpha: FLAT_PROFILE_ALPHA,
            r2: 0.0,
            scales,
            fluctuations,
        });
    }

    let (log_s, log_f): (Vec<f64>, Vec<f64>) = scales
        .iter()
        .zip(&fluctuations)
        .filter(|(_, f)| **f >= FLUCTUATION_EPSILON)
        .map(|(s, f)| (s.ln(), f.ln()))
        .unzip();

    if log_s.len() < 2 {
        return Err(AnalysisError::degenerate(
            Metric::Dfa,
            "fewer than two scales with measurable fluctuation",
        ));
    }

    let fit = trend::fit_xy(&log_s, &log_f).ok_or_else(|| {
        AnalysisError::degenerate(Metric::Dfa, "log-log regressor has no spread")
    })?;

    if !fit.slope.is_finite() {
        return Err(AnalysisError::degenerate(
            Metric::Dfa,
            "scaling exponent is not finite",
        ));
    }

    Ok(DfaResult {
        alpha: fit.slope,
        r2: fit.r2,
        scales,
        fluctuations,
    })
}

/// Cumulative sum of the mean-centred signal.
fn profile(samples: &[f64]) -> Result<Vec<f64>> {
    let mean = trend::bias(samples)?;
    let mut acc = 0.0;
    Ok(samples
        .iter()
        .map(|v| {
            acc += v - mean;
            acc
        })
        .collect())
}

/// Mean RMS of linearly detrended, non-overlapping windows of length `scale`.
fn fluctuation(profile: &[f64], scale: usize) -> f64 {
    let windows = profile.len() / scale;
    if windows == 0 || scale < 2 {
        return 0.0;
    }

    let mut total = 0.0;
    for w in 0..windows {
        let segment = &profile[w * scale..(w + 1) * scale];
        let (slope, intercept) = fit_indexed(segment);
        let sum_sq: f64 = segment
            .iter()
            .enumerate()
            .map(|(i, v)| (v - (intercept + slope * i as f64)).powi(2))
            .sum();
        total += (sum_sq / scale as f64).sqrt();
    }
    total / windows as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use sensor_health_testdata::{generate, GeneratorConfig, SignalPattern};

    fn seeded(n: usize, seed: u64, pattern: SignalPattern) -> Vec<f64> {
        let config = GeneratorConfig::new().with_num_samples(n).with_seed(seed);
        generate(&config, &pattern).unwrap()
    }

    #[test]
    fn test_scales_for_minimum_length() {
        let scales = dfa_scales(MIN_DFA_SAMPLES);
        assert_eq!(scales, vec![4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_scales_strictly_increasing() {
        for n in [32, 50, 100, 1000, 10_000] {
            let scales = dfa_scales(n);
            assert!(scales.windows(2).all(|w| w[0] < w[1]), "n={n}");
            assert_eq!(scales[0], DFA_MIN_SCALE);
            assert_eq!(*scales.last().unwrap(), n / 4);
        }
    }

    #[test]
    fn test_scales_too_short() {
        assert!(dfa_scales(12).is_empty());
        assert_eq!(dfa_scales(16), vec![4]);
    }

    #[test]
    fn test_insufficient_data() {
        let err = dfa(&[1.0; 20]).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::insufficient(Metric::Dfa, MIN_DFA_SAMPLES, 20)
        );
    }

    #[test]
    fn test_flat_signal_sentinel() {
        let result = dfa(&[3.3; 64]).unwrap();
        assert!(result.is_flat());
        assert_eq!(result.alpha, FLAT_PROFILE_ALPHA);
        assert_eq!(result.r2, 0.0);
        assert_eq!(result.scales.len(), result.fluctuations.len());
    }

    #[test]
    fn test_white_noise_near_half() {
        let samples = seeded(4096, 11, SignalPattern::noise(1.0));
        let result = dfa(&samples).unwrap();
        assert!(
            (0.35..0.65).contains(&result.alpha),
            "alpha = {}",
            result.alpha
        );
    }

    #[test]
    fn test_random_walk_persistent() {
        let walk = seeded(4096, 42, SignalPattern::random_walk(0.0, 1.0));
        let result = dfa(&walk).unwrap();
        assert!(result.alpha > 1.2, "alpha = {}", result.alpha);
    }

    #[test]
    fn test_linear_drift_near_two() {
        let samples: Vec<f64> = (0..100).map(|i| 0.2 * i as f64).collect();
        let result = dfa(&samples).unwrap();
        assert_abs_diff_eq!(result.alpha, 2.0, epsilon = 0.1);
        assert!(result.r2 > 0.99);
    }

    #[test]
    fn test_deterministic() {
        let samples = seeded(500, 7, SignalPattern::noise(1.0));
        assert_eq!(dfa(&samples).unwrap(), dfa(&samples).unwrap());
    }
}
