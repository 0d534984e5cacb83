//! Metrics engine
//!
//! Computes five independent descriptors of a uniformly sampled signal:
//! bias, linear drift, residual noise, phase-portrait hysteresis and the
//! DFA scaling exponent. Each descriptor lives in its own submodule and can
//! be called on its own; [`compute_metrics`] runs them all and bundles the
//! result into an [`AnalysisMetrics`] record.

pub mod dfa;
pub mod hysteresis;
pub mod stats;
pub mod trend;

pub use dfa::{dfa, DfaResult, MIN_DFA_SAMPLES};
pub use hysteresis::{lag_hysteresis, paired_hysteresis, shoelace_area, HysteresisLoop};
pub use stats::SummaryStats;
pub use trend::{bias, fit_trend, noise, LinearFit, NoiseEstimate, SNR_CEILING_DB};

use crate::error::Result;
use crate::samples::validate_samples;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Individual signal descriptor, used to tag errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Bias,
    Slope,
    Noise,
    Hysteresis,
    Dfa,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Bias => "bias",
            Metric::Slope => "slope",
            Metric::Noise => "noise",
            Metric::Hysteresis => "hysteresis",
            Metric::Dfa => "dfa",
        }
    }

    /// Minimum sequence length for this metric on the lag-1 path.
    pub fn min_samples(&self) -> usize {
        match self {
            Metric::Bias => trend::MIN_BIAS_SAMPLES,
            Metric::Slope | Metric::Noise => trend::MIN_TREND_SAMPLES,
            Metric::Hysteresis => hysteresis::MIN_HYSTERESIS_POINTS + 1,
            Metric::Dfa => dfa::MIN_DFA_SAMPLES,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All computed descriptors for one sample window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetrics {
    /// Number of samples analysed.
    pub sample_count: usize,
    /// Arithmetic mean.
    pub bias: f64,
    /// Drift per sample index.
    pub slope: f64,
    /// Fitted value at index 0.
    pub intercept: f64,
    /// R² of the linear trend.
    pub trend_r2: f64,
    /// Population std of detrended residuals.
    pub noise_std: f64,
    /// Signal-to-noise ratio in decibels.
    pub snr_db: f64,
    /// Normalized phase-portrait loop area.
    pub hysteresis: f64,
    pub hysteresis_x: Vec<f64>,
    pub hysteresis_y: Vec<f64>,
    /// DFA-1 scaling exponent.
    pub hurst: f64,
    /// R² of the log-log DFA fit.
    pub hurst_r2: f64,
    pub dfa_scales: Vec<f64>,
    pub dfa_fluctuations: Vec<f64>,
}

impl AnalysisMetrics {
    /// Linear trend as a [`LinearFit`].
    pub fn trend_fit(&self) -> LinearFit {
        LinearFit {
            slope: self.slope,
            intercept: self.intercept,
            r2: self.trend_r2,
        }
    }

    /// Fitted trend value at the last sample.
    pub fn current_level(&self) -> f64 {
        self.trend_fit()
            .at(self.sample_count.saturating_sub(1) as f64)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Compute every metric for `samples`.
///
/// `paired_y`, when given, replaces the lag-1 phase portrait with explicit
/// `(samples[k], paired_y[k])` points for hysteresis.
pub fn compute_metrics(samples: &[f64], paired_y: Option<&[f64]>) -> Result<AnalysisMetrics> {
    validate_samples(samples)?;
    if let Some(y) = paired_y {
        validate_samples(y)?;
    }

    // DFA has the largest minimum; check it up front so a short window
    // reports the binding constraint rather than whichever metric ran first.
    if samples.len() < MIN_DFA_SAMPLES {
        return Err(crate::error::AnalysisError::insufficient(
            Metric::Dfa,
            MIN_DFA_SAMPLES,
            samples.len(),
        ));
    }

    let bias = trend::bias(samples)?;
    let fit = trend::fit_trend(samples)?;
    let noise = trend::noise(samples, &fit)?;
    let hysteresis = match paired_y {
        Some(y) => paired_hysteresis(samples, y)?,
        None => lag_hysteresis(samples)?,
    };
    let dfa = dfa::dfa(samples)?;

    debug!(
        samples = samples.len(),
        bias,
        slope = fit.slope,
        snr_db = noise.snr_db,
        hysteresis = hysteresis.area,
        hurst = dfa.alpha,
        "computed metrics"
    );

    Ok(AnalysisMetrics {
        sample_count: samples.len(),
        bias,
        slope: fit.slope,
        intercept: fit.intercept,
        trend_r2: fit.r2,
        noise_std: noise.noise_std,
        snr_db: noise.snr_db,
        hysteresis: hysteresis.area,
        hysteresis_x: hysteresis.x,
        hysteresis_y: hysteresis.y,
        hurst: dfa.alpha,
        hurst_r2: dfa.r2,
        dfa_scales: dfa.scales,
        dfa_fluctuations: dfa.fluctuations,
    })
}
