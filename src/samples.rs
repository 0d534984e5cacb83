//! Boundary validation for raw sample sequences.
//!
//! Everything downstream of this module assumes finite input. The strict
//! path ([`validate_samples`]) rejects the first non-finite value; the
//! lenient path ([`preprocess`]) drops them and reports how many it removed.

use crate::error::{AnalysisError, Result};
use tracing::warn;

/// Reject NaN and infinite samples.
pub fn validate_samples(samples: &[f64]) -> Result<()> {
    match samples.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(AnalysisError::NonFiniteSample {
            index,
            value: samples[index],
        }),
        None => Ok(()),
    }
}

/// Result of lenient preprocessing.
#[derive(Debug, Clone, PartialEq)]
pub struct Preprocessed {
    /// Finite samples in their original order.
    pub values: Vec<f64>,
    /// Number of samples removed.
    pub dropped: usize,
}

impl Preprocessed {
    /// True when nothing had to be removed.
    pub fn is_clean(&self) -> bool {
        self.dropped == 0
    }
}

/// Drop non-finite samples, keeping order.
///
/// Removing samples shifts the index of every later value, so the slope
/// of a gappy series is computed as if the survivors were contiguous.
pub fn preprocess(samples: &[f64]) -> Preprocessed {
    let values: Vec<f64> = samples.iter().copied().filter(|v| v.is_finite()).collect();
    let dropped = samples.len() - values.len();
    if dropped > 0 {
        warn!(
            dropped,
            kept = values.len(),
            "dropped non-finite samples before analysis"
        );
    }
    Preprocessed { values, dropped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_finite() {
        assert!(validate_samples(&[1.0, -2.5, 0.0, 1e300]).is_ok());
        assert!(validate_samples(&[]).is_ok());
    }

    #[test]
    fn test_validate_reports_first_bad_index() {
        let err = validate_samples(&[1.0, 2.0, f64::INFINITY, f64::NAN]).unwrap_err();
        match err {
            AnalysisError::NonFiniteSample { index, value } => {
                assert_eq!(index, 2);
                assert!(value.is_infinite());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_preprocess_drops_nan() {
        let out = preprocess(&[1.0, f64::NAN, 3.0, f64::NEG_INFINITY, 5.0]);
        assert_eq!(out.values, vec![1.0, 3.0, 5.0]);
        assert_eq!(out.dropped, 2);
        assert!(!out.is_clean());
    }

    #[test]
    fn test_preprocess_clean_input() {
        let out = preprocess(&[1.0, 2.0]);
        assert!(out.is_clean());
        assert_eq!(out.values.len(), 2);
    }
}
