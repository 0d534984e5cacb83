//! Error types for sensor health analysis
//!
//! Every failure is local and deterministic: retrying on identical input
//! yields the identical error.

use crate::metrics::Metric;
use thiserror::Error;

/// Result type alias for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Main error type for analysis operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Sequence too short for the requested metric
    #[error("Insufficient data for {metric}: need at least {required} samples, got {actual}")]
    InsufficientData {
        metric: Metric,
        required: usize,
        actual: usize,
    },

    /// Input that is long enough but has no usable statistical structure
    #[error("Degenerate input for {metric}: {reason}")]
    DegenerateInput { metric: Metric, reason: String },

    /// Configuration value outside its allowed domain
    #[error("Invalid configuration: {field} = {value} ({reason})")]
    InvalidConfiguration {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Sample is NaN or infinite
    #[error("Non-finite sample at index {index}: {value}")]
    NonFiniteSample { index: usize, value: f64 },

    /// Paired hysteresis series have different lengths
    #[error("Paired series length mismatch: {x} x-values, {y} y-values")]
    LengthMismatch { x: usize, y: usize },
}

impl AnalysisError {
    pub(crate) fn insufficient(metric: Metric, required: usize, actual: usize) -> Self {
        Self::InsufficientData {
            metric,
            required,
            actual,
        }
    }

    pub(crate) fn degenerate(metric: Metric, reason: impl Into<String>) -> Self {
        Self::DegenerateInput {
            metric,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_config(field: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidConfiguration {
            field,
            value,
            reason,
        }
    }

    /// Whether more samples could make this input analysable.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }

    /// Short machine-readable error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InsufficientData { .. } => "insufficient_data",
            Self::DegenerateInput { .. } => "degenerate_input",
            Self::InvalidConfiguration { .. } => "invalid_configuration",
            Self::NonFiniteSample { .. } => "non_finite_sample",
            Self::LengthMismatch { .. } => "length_mismatch",
        }
    }
}
