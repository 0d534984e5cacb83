// Sensor Health Testdata - Anomaly injection
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Fault injection into generated signals.
//!
//! Each anomaly type maps to the diagnosis rule it is expected to trip,
//! so tests can assert the engine notices the fault.

use crate::error::{Result, TestdataError};
use crate::patterns::gaussian;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

/// Anomaly injection configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyConfig {
    /// Type of anomaly to inject.
    pub anomaly_type: AnomalyType,
    /// Sample index when anomaly starts.
    pub start_sample: usize,
    /// Duration in samples (None = until end).
    pub duration_samples: Option<usize>,
}

impl AnomalyConfig {
    /// Create a new anomaly configuration.
    pub fn new(anomaly_type: AnomalyType, start_sample: usize) -> Self {
        Self {
            anomaly_type,
            start_sample,
            duration_samples: None,
        }
    }

    /// Set duration in samples.
    pub fn with_duration(mut self, samples: usize) -> Self {
        self.duration_samples = Some(samples);
        self
    }

    /// Check if anomaly is active at given sample index.
    pub fn is_active(&self, sample_idx: usize) -> bool {
        if sample_idx < self.start_sample {
            return false;
        }
        match self.duration_samples {
            Some(duration) => sample_idx < self.start_sample + duration,
            None => true,
        }
    }

    /// Get samples since anomaly start.
    pub fn samples_since_start(&self, sample_idx: usize) -> usize {
        sample_idx.saturating_sub(self.start_sample)
    }
}

/// Type of anomaly to inject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnomalyType {
    /// Sensor value stuck at the first reading of the window.
    Stuck,

    /// Single-sample spike at the window start.
    Spike {
        /// Offset added to the spiked sample.
        magnitude: f64,
    },

    /// Gradual drift away from normal.
    Drift {
        /// Rate of drift per sample.
        rate_per_sample: f64,
    },

    /// Extra Gaussian noise over the window.
    NoiseBurst {
        /// Standard deviation of the added noise.
        noise_std: f64,
    },

    /// Samples replaced by NaN.
    Dropout,
}

impl AnomalyType {
    /// Diagnosis flag this fault is expected to raise, if any.
    ///
    /// Names match `sensor_health::RuleFlag::as_str` (`SLOPE_DRIFT`,
    /// `BIAS_OFFSET`, `LOW_SNR`, `HYSTERESIS`, `HURST_INSTABILITY`). This
    /// crate sits below the engine, so the names are plain strings.
    pub fn expected_flag(&self) -> Option<&'static str> {
        match self {
            AnomalyType::Stuck => None,
            AnomalyType::Spike { .. } => None,
            AnomalyType::Drift { .. } => Some("SLOPE_DRIFT"),
            AnomalyType::NoiseBurst { .. } => Some("LOW_SNR"),
            AnomalyType::Dropout => None,
        }
    }
}

/// Apply `anomaly` to `samples` in place.
pub fn inject(
    samples: &mut [f64],
    anomaly: &AnomalyConfig,
    rng: &mut (impl Rng + ?Sized),
) -> Result<()> {
    if anomaly.start_sample >= samples.len() {
        return Err(TestdataError::AnomalyOutOfRange {
            start: anomaly.start_sample,
            len: samples.len(),
        });
    }

    let stuck_value = samples[anomaly.start_sample];
    let noise = match &anomaly.anomaly_type {
        AnomalyType::NoiseBurst { noise_std } => Some(gaussian(*noise_std, "noise_std")?),
        _ => None,
    };

    for (i, sample) in samples.iter_mut().enumerate() {
        if !anomaly.is_active(i) {
            continue;
        }
        let since = anomaly.samples_since_start(i);
        *sample = match &anomaly.anomaly_type {
            AnomalyType::Stuck => stuck_value,
            AnomalyType::Spike { magnitude } => {
                if since == 0 {
                    *sample + magnitude
                } else {
                    *sample
                }
            }
            AnomalyType::Drift { rate_per_sample } => {
                *sample + rate_per_sample * (since + 1) as f64
            }
            AnomalyType::NoiseBurst { .. } => match &noise {
                Some(dist) => *sample + dist.sample(rng),
                None => *sample,
            },
            AnomalyType::Dropout => f64::NAN,
        };
    }
    Ok(())
}
