// Sensor Health Testdata - Core generator
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Sample-sequence generation.
//!
//! Samples are evaluated on an evenly spaced time grid over
//! `[0, time_span]`, endpoints included.

use crate::anomalies::{inject, AnomalyConfig};
use crate::error::{Result, TestdataError};
use crate::patterns::{PatternState, SignalPattern};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Default time span of the evaluation grid.
pub const DEFAULT_TIME_SPAN: f64 = 10.0;

/// Generator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Number of samples to generate.
    pub num_samples: usize,
    /// Last point of the time grid; the first is 0.
    pub time_span: f64,
    /// Random seed for reproducibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Anomalies applied after the pattern is evaluated.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub anomalies: Vec<AnomalyConfig>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            num_samples: 100,
            time_span: DEFAULT_TIME_SPAN,
            seed: None,
            anomalies: Vec::new(),
        }
    }
}

impl GeneratorConfig {
    /// Create a new generator config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set number of samples.
    pub fn with_num_samples(mut self, n: usize) -> Self {
        self.num_samples = n;
        self
    }

    /// Set the end of the time grid.
    pub fn with_time_span(mut self, span: f64) -> Self {
        self.time_span = span;
        self
    }

    /// Set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Add an anomaly.
    pub fn with_anomaly(mut self, anomaly: AnomalyConfig) -> Self {
        self.anomalies.push(anomaly);
        self
    }

    /// Time coordinate of sample `i`.
    pub fn time_at(&self, i: usize) -> f64 {
        if self.num_samples <= 1 {
            return 0.0;
        }
        self.time_span * i as f64 / (self.num_samples - 1) as f64
    }

    /// The full time grid.
    pub fn time_grid(&self) -> Vec<f64> {
        (0..self.num_samples).map(|i| self.time_at(i)).collect()
    }

    /// Seeded RNG, or one from OS entropy when no seed is set.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Evaluate `pattern` over the configured grid and apply anomalies.
pub fn generate(config: &GeneratorConfig, pattern: &SignalPattern) -> Result<Vec<f64>> {
    if !config.time_span.is_finite() || config.time_span <= 0.0 {
        return Err(TestdataError::invalid(
            "time_span",
            config.time_span,
            "must be finite and > 0",
        ));
    }

    let mut rng = config.rng();
    let mut state = PatternState::for_pattern(pattern);

    let mut samples = Vec::with_capacity(config.num_samples);
    for i in 0..config.num_samples {
        samples.push(state.evaluate(pattern, config.time_at(i), &mut rng)?);
    }

    for anomaly in &config.anomalies {
        inject(&mut samples, anomaly, &mut rng)?;
    }

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anomalies::AnomalyType;

    #[test]
    fn test_time_grid_endpoints() {
        let config = GeneratorConfig::new().with_num_samples(11);
        let grid = config.time_grid();
        assert_eq!(grid.len(), 11);
        assert_eq!(grid[0], 0.0);
        assert_eq!(grid[10], 10.0);
        assert!((grid[5] - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_sample_grid() {
        let config = GeneratorConfig::new().with_num_samples(1);
        assert_eq!(config.time_grid(), vec![0.0]);
    }

    #[test]
    fn test_seed_reproducible() {
        let config = GeneratorConfig::new().with_num_samples(50).with_seed(7);
        let pattern = SignalPattern::noise(1.0);
        let a = generate(&config, &pattern).unwrap();
        let b = generate(&config, &pattern).unwrap();
        assert_eq!(a, b);

        let c = generate(&config.clone().with_seed(8), &pattern).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_deterministic_pattern() {
        let config = GeneratorConfig::new().with_num_samples(5).with_time_span(4.0);
        let pattern = SignalPattern::Linear {
            start: 1.0,
            slope: 2.0,
        };
        let samples = generate(&config, &pattern).unwrap();
        assert_eq!(samples, vec![1.0, 3.0, 5.0, 7.0, 9.0]);
    }

    #[test]
    fn test_anomaly_applied() {
        let config = GeneratorConfig::new()
            .with_num_samples(10)
            .with_seed(1)
            .with_anomaly(AnomalyConfig::new(AnomalyType::Spike { magnitude: 100.0 }, 4));
        let samples = generate(&config, &SignalPattern::Constant { value: 1.0 }).unwrap();
        assert_eq!(samples[3], 1.0);
        assert_eq!(samples[4], 101.0);
        assert_eq!(samples[5], 1.0);
    }

    #[test]
    fn test_invalid_time_span() {
        let config = GeneratorConfig::new().with_time_span(0.0);
        assert!(generate(&config, &SignalPattern::Constant { value: 0.0 }).is_err());
    }
}
