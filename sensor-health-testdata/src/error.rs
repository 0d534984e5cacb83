// Sensor Health Testdata - Synthetic sensor signal generator
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Error types for signal generation.

use thiserror::Error;

/// Result type alias for generation operations.
pub type Result<T> = std::result::Result<T, TestdataError>;

/// Errors raised while building or evaluating a signal.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TestdataError {
    /// A distribution or pattern parameter is out of range.
    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Unrecognised synthetic kind name.
    #[error("Unknown signal kind: {0} (expected normal, drifting, noisy or oscillation)")]
    UnknownKind(String),

    /// Anomaly window starts past the end of the signal.
    #[error("Anomaly starts at sample {start} but the signal has {len} samples")]
    AnomalyOutOfRange { start: usize, len: usize },
}

impl TestdataError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}
