//! Bias, linear drift, and residual noise.
//!
//! All sums run in index order so results are bit-for-bit reproducible.

use super::Metric;
use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};

/// Minimum samples for a mean.
pub const MIN_BIAS_SAMPLES: usize = 1;

/// Minimum samples for a linear fit.
pub const MIN_TREND_SAMPLES: usize = 2;

/// Noise floor used as SNR denominator guard.
pub const SNR_EPSILON: f64 = 1e-9;

/// SNR reported when residual noise is below [`SNR_EPSILON`].
pub const SNR_CEILING_DB: f64 = 120.0;

/// Ordinary least-squares line fitted against sample index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    /// Change per sample.
    pub slope: f64,
    /// Fitted value at index 0.
    pub intercept: f64,
    /// Coefficient of determination, clamped to [0, 1].
    pub r2: f64,
}

impl LinearFit {
    /// Fitted value at sample index `i`.
    pub fn at(&self, i: f64) -> f64 {
        self.intercept + self.slope * i
    }

    /// Fitted trend for every index in `0..n`.
    pub fn trend(&self, n: usize) -> Vec<f64> {
        (0..n).map(|i| self.at(i as f64)).collect()
    }

    /// `samples[i] - fit(i)` for every sample.
    pub fn residuals(&self, samples: &[f64]) -> Vec<f64> {
        samples
            .iter()
            .enumerate()
            .map(|(i, v)| v - self.at(i as f64))
            .collect()
    }
}

/// Residual dispersion and signal-to-noise ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseEstimate {
    /// Population standard deviation of detrended residuals.
    pub noise_std: f64,
    /// Root mean square of the raw signal.
    pub rms: f64,
    /// `20 * log10(rms / max(noise_std, eps))`, capped at [`SNR_CEILING_DB`].
    pub snr_db: f64,
}

/// Arithmetic mean.
pub fn bias(samples: &[f64]) -> Result<f64> {
    if samples.len() < MIN_BIAS_SAMPLES {
        return Err(AnalysisError::insufficient(
            Metric::Bias,
            MIN_BIAS_SAMPLES,
            samples.len(),
        ));
    }
    if is_constant(samples) {
        return Ok(samples[0]);
    }
    Ok(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Least-squares line of value against 0-based index.
///
/// Uses the centred form of the normal equations,
/// `slope = Σ(i - ī)(v - v̄) / Σ(i - ī)²`, which is algebraically equal to
/// `(nΣiv - ΣiΣv) / (nΣi² - (Σi)²)` but does not cancel catastrophically on
/// large offsets.
pub fn fit_trend(samples: &[f64]) -> Result<LinearFit> {
    let n = samples.len();
    if n < MIN_TREND_SAMPLES {
        return Err(AnalysisError::insufficient(
            Metric::Slope,
            MIN_TREND_SAMPLES,
            n,
        ));
    }

    if is_constant(samples) {
        return Ok(LinearFit {
            slope: 0.0,
            intercept: samples[0],
            r2: 0.0,
        });
    }

    let (slope, intercept) = fit_indexed(samples);
    let mean = samples.iter().sum::<f64>() / n as f64;

    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for (i, v) in samples.iter().enumerate() {
        let fitted = intercept + slope * i as f64;
        ss_res += (v - fitted).powi(2);
        ss_tot += (v - mean).powi(2);
    }

    Ok(LinearFit {
        slope,
        intercept,
        r2: coefficient_of_determination(ss_res, ss_tot),
    })
}

/// Residual noise and SNR of `samples` around `fit`.
pub fn noise(samples: &[f64], fit: &LinearFit) -> Result<NoiseEstimate> {
    let n = samples.len();
    if n < MIN_TREND_SAMPLES {
        return Err(AnalysisError::insufficient(
            Metric::Noise,
            MIN_TREND_SAMPLES,
            n,
        ));
    }

    let residuals = fit.residuals(samples);
    let noise_std = population_std(&residuals);
    let rms = (samples.iter().map(|v| v * v).sum::<f64>() / n as f64).sqrt();

    Ok(NoiseEstimate {
        noise_std,
        rms,
        snr_db: snr_db(rms, noise_std),
    })
}

/// Decibel ratio of signal RMS to noise, with the flat-signal sentinel.
pub fn snr_db(rms: f64, noise_std: f64) -> f64 {
    if noise_std < SNR_EPSILON {
        return SNR_CEILING_DB;
    }
    let ratio = rms / noise_std.max(SNR_EPSILON);
    if ratio <= 0.0 {
        return 0.0;
    }
    (20.0 * ratio.log10()).min(SNR_CEILING_DB)
}

/// Slope and intercept of `values` regressed on `0..len`.
///
/// Callers guarantee `values.len() >= 2`.
pub(crate) fn fit_indexed(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean_i = (n - 1.0) / 2.0;
    let mean_v = values.iter().sum::<f64>() / n;

    let mut s_iv = 0.0;
    let mut s_ii = 0.0;
    for (i, v) in values.iter().enumerate() {
        let di = i as f64 - mean_i;
        s_iv += di * (v - mean_v);
        s_ii += di * di;
    }

    let slope = s_iv / s_ii;
    (slope, mean_v - slope * mean_i)
}

/// Slope, intercept and R² of `ys` regressed on `xs`.
///
/// Returns `None` when the regressor has no spread.
pub(crate) fn fit_xy(xs: &[f64], ys: &[f64]) -> Option<LinearFit> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }
    let nf = n as f64;
    let mean_x = xs[..n].iter().sum::<f64>() / nf;
    let mean_y = ys[..n].iter().sum::<f64>() / nf;

    let mut s_xy = 0.0;
    let mut s_xx = 0.0;
    let mut s_yy = 0.0;
    for (x, y) in xs[..n].iter().zip(&ys[..n]) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        s_xy += dx * dy;
        s_xx += dx * dx;
        s_yy += dy * dy;
    }

    if s_xx <= f64::EPSILON {
        return None;
    }

    let slope = s_xy / s_xx;
    let ss_res = (s_yy - slope * s_xy).max(0.0);
    Some(LinearFit {
        slope,
        intercept: mean_y - slope * mean_x,
        r2: coefficient_of_determination(ss_res, s_yy),
    })
}

pub(crate) fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    var.max(0.0).sqrt()
}

fn coefficient_of_determination(ss_res: f64, ss_tot: f64) -> f64 {
    if ss_tot <= f64::EPSILON {
        return 0.0;
    }
    (1.0 - ss_res / ss_tot).clamp(0.0, 1.0)
}

fn is_constant(samples: &[f64]) -> bool {
    samples.iter().all(|v| *v == samples[0])
}
