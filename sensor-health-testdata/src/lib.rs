// Sensor Health Testdata - Synthetic sensor signal generator
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! # Sensor Health Testdata
//!
//! Deterministic synthetic sensor signals for exercising the
//! `sensor-health` engine in tests, benchmarks and the CLI.
//!
//! - **Signal patterns**: sine, linear, noise, random walk, steps
//! - **Presets**: the `normal`, `drifting`, `noisy` and `oscillation`
//!   behaviours via [`SyntheticKind`]
//! - **Anomaly injection**: stuck readings, spikes, drift, noise bursts, dropouts
//!
//! ## Quick Start
//!
//! ```rust
//! use sensor_health_testdata::{generate_synthetic, SyntheticKind};
//!
//! let samples = generate_synthetic(SyntheticKind::Drifting, 200, Some(42)).unwrap();
//! assert_eq!(samples.len(), 200);
//! ```
//!
//! ## Anomaly Injection
//!
//! ```rust
//! use sensor_health_testdata::{generate, AnomalyConfig, AnomalyType, GeneratorConfig, SignalPattern};
//!
//! let config = GeneratorConfig::new()
//!     .with_num_samples(500)
//!     .with_seed(7)
//!     .with_anomaly(AnomalyConfig::new(AnomalyType::Stuck, 250).with_duration(100));
//!
//! let samples = generate(&config, &SignalPattern::sine(10.0, 1.0)).unwrap();
//! assert_eq!(samples[250], samples[349]);
//! ```

pub mod anomalies;
pub mod error;
pub mod generator;
pub mod patterns;
pub mod scenario;

// Re-exports for convenience
pub use anomalies::{inject, AnomalyConfig, AnomalyType};
pub use error::{Result, TestdataError};
pub use generator::{generate, GeneratorConfig};
pub use patterns::{PatternState, SignalPattern};
pub use scenario::{generate_synthetic, SyntheticKind};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
