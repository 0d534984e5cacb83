//! # Sensor Health - Signal analysis and health scoring for sensor time series
//!
//! Turns a window of raw sensor readings into quantitative signal
//! descriptors and a maintenance-oriented health assessment.
//!
//! ## Key Features
//!
//! - **Metrics Engine**: bias, linear drift, residual noise / SNR,
//!   phase-portrait hysteresis, and the DFA scaling exponent
//! - **Scoring Engine**: 0-100 health score, status band, rule-table
//!   diagnosis and recommendation
//! - **RUL**: linear extrapolation of the fitted trend to a failure threshold
//! - **Deterministic**: identical input gives byte-identical output
//!
//! ## Quick Start
//!
//! ```rust
//! use sensor_health::{Analyzer, AnalysisConfig, HealthStatus, RuleFlag};
//!
//! let analyzer = Analyzer::new(AnalysisConfig::default()).unwrap();
//!
//! // A sensor drifting upwards by 0.2 units per sample
//! let samples: Vec<f64> = (0..100).map(|i| 0.2 * i as f64).collect();
//! let analysis = analyzer.analyze(&samples).unwrap();
//!
//! assert!(analysis.result.has_flag(RuleFlag::SlopeDrift));
//! assert_eq!(analysis.result.diagnosis, "Critical Trend Drift");
//! assert_ne!(analysis.result.status, HealthStatus::Normal);
//! ```
//!
//! ## Modules
//!
//! - [`metrics`]: Signal descriptors and [`compute_metrics`]
//! - [`scoring`]: Rule table, status bands, RUL and [`score`]
//! - [`config`]: Thresholds and RUL baseline
//! - [`analyzer`]: Facade running both engines
//! - [`samples`]: Input validation and lenient preprocessing

// Modules
pub mod analyzer;
pub mod config;
pub mod error;
pub mod metrics;
pub mod samples;
pub mod scoring;

// Re-exports for convenient access
pub use analyzer::{Analysis, Analyzer};
pub use config::{AnalysisConfig, RulBaseline, ScoringConfig, Thresholds};
pub use error::{AnalysisError, Result};
pub use metrics::{compute_metrics, AnalysisMetrics, Metric, SummaryStats};
pub use samples::{preprocess, validate_samples, Preprocessed};
pub use scoring::{
    score, AnalysisResult, HealthStatus, IndefiniteReason, Prediction, RuleFlag,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
