//! Remaining-useful-life projection by linear extrapolation of the fitted trend.

use crate::config::RulBaseline;
use crate::metrics::AnalysisMetrics;
use serde::{Deserialize, Serialize};

/// Slopes with magnitude below this are treated as no drift.
pub const SLOPE_EPSILON: f64 = 1e-9;

pub const LINEAR_EXTRAPOLATION: &str = "linear_extrapolation";

const SECONDS_PER_HOUR: f64 = 3600.0;
const HOURS_PER_DAY: f64 = 24.0;

/// Why no finite RUL could be projected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndefiniteReason {
    /// Trend is flat.
    NoDrift,
    /// Trend moves away from the failure threshold.
    Receding,
    /// Projection overflowed.
    Unbounded,
}

/// RUL outcome.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Prediction {
    Finite {
        rul_samples: f64,
        rul_seconds: f64,
        rul_hours: f64,
        rul_days: f64,
        /// R² of the trend the projection is based on.
        confidence: f64,
        method: String,
    },
    Indefinite {
        reason: IndefiniteReason,
    },
    AlreadyCritical,
    #[default]
    NotConfigured,
}

impl Prediction {
    pub fn is_finite(&self) -> bool {
        matches!(self, Prediction::Finite { .. })
    }

    /// Remaining days, if finite.
    pub fn days(&self) -> Option<f64> {
        match self {
            Prediction::Finite { rul_days, .. } => Some(*rul_days),
            _ => None,
        }
    }
}

/// Project when the fitted trend crosses the baseline's critical threshold.
pub fn predict_rul(metrics: &AnalysisMetrics, baseline: Option<&RulBaseline>) -> Prediction {
    let Some(baseline) = baseline else {
        return Prediction::NotConfigured;
    };

    let slope = metrics.slope;
    if slope.abs() < SLOPE_EPSILON {
        return Prediction::Indefinite {
            reason: IndefiniteReason::NoDrift,
        };
    }

    let level = metrics.current_level();
    if baseline.is_failed(level) {
        return Prediction::AlreadyCritical;
    }

    if slope.signum() != baseline.failure_direction() {
        return Prediction::Indefinite {
            reason: IndefiniteReason::Receding,
        };
    }

    let rul_samples = (baseline.critical_threshold - level) / slope;
    let rul_seconds = rul_samples * baseline.sample_interval_seconds;
    let rul_hours = rul_seconds / SECONDS_PER_HOUR;
    let rul_days = rul_hours / HOURS_PER_DAY;

    if ![rul_samples, rul_seconds, rul_hours, rul_days]
        .iter()
        .all(|v| v.is_finite())
    {
        return Prediction::Indefinite {
            reason: IndefiniteReason::Unbounded,
        };
    }

    Prediction::Finite {
        rul_samples,
        rul_seconds,
        rul_hours,
        rul_days,
        confidence: metrics.trend_r2,
        method: LINEAR_EXTRAPOLATION.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn trend(slope: f64, intercept: f64, n: usize) -> AnalysisMetrics {
        AnalysisMetrics {
            sample_count: n,
            bias: intercept,
            slope,
            intercept,
            trend_r2: 0.9,
            noise_std: 0.0,
            snr_db: 120.0,
            hysteresis: 0.0,
            hysteresis_x: Vec::new(),
            hysteresis_y: Vec::new(),
            hurst: 0.5,
            hurst_r2: 0.0,
            dfa_scales: Vec::new(),
            dfa_fluctuations: Vec::new(),
        }
    }

    #[test]
    fn test_not_configured() {
        assert_eq!(
            predict_rul(&trend(1.0, 0.0, 10), None),
            Prediction::NotConfigured
        );
    }

    #[test]
    fn test_zero_slope_indefinite() {
        let baseline = RulBaseline::new(10.0, 1.0);
        assert_eq!(
            predict_rul(&trend(0.0, 5.0, 10), Some(&baseline)),
            Prediction::Indefinite {
                reason: IndefiniteReason::NoDrift
            }
        );
    }

    #[test]
    fn test_finite_projection() {
        // Level at last sample (i = 99) is 0.1 * 99 = 9.9; 10.1 units to go at 0.1/sample
        let baseline = RulBaseline::new(20.0, 60.0);
        let prediction = predict_rul(&trend(0.1, 0.0, 100), Some(&baseline));
        match prediction {
            Prediction::Finite {
                rul_samples,
                rul_seconds,
                rul_hours,
                rul_days,
                confidence,
                method,
            } => {
                assert_abs_diff_eq!(rul_samples, 101.0, epsilon = 1e-9);
                assert_abs_diff_eq!(rul_seconds, 6060.0, epsilon = 1e-6);
                assert_abs_diff_eq!(rul_hours, 6060.0 / 3600.0, epsilon = 1e-9);
                assert_abs_diff_eq!(rul_days, 6060.0 / 86400.0, epsilon = 1e-9);
                assert_eq!(confidence, 0.9);
                assert_eq!(method, "linear_extrapolation");
            }
            other => panic!("expected finite prediction, got {other:?}"),
        }
    }

    #[test]
    fn test_downward_failure() {
        let baseline = RulBaseline::new(-10.0, 1.0);
        let prediction = predict_rul(&trend(-0.5, 0.0, 11), Some(&baseline));
        // Level -5.0, 5 units to go at 0.5/sample
        assert_abs_diff_eq!(prediction.days().unwrap() * 86400.0, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_already_critical_inclusive() {
        let baseline = RulBaseline::new(9.0, 1.0);
        assert_eq!(
            predict_rul(&trend(1.0, 0.0, 10), Some(&baseline)),
            Prediction::AlreadyCritical
        );
    }

    #[test]
    fn test_receding() {
        let baseline = RulBaseline::new(10.0, 1.0);
        assert_eq!(
            predict_rul(&trend(-0.2, 5.0, 10), Some(&baseline)),
            Prediction::Indefinite {
                reason: IndefiniteReason::Receding
            }
        );
    }

    #[test]
    fn test_overflow_unbounded() {
        let baseline = RulBaseline::new(1e308, f64::MAX);
        let prediction = predict_rul(&trend(1e-8, 0.0, 10), Some(&baseline));
        assert_eq!(
            prediction,
            Prediction::Indefinite {
                reason: IndefiniteReason::Unbounded
            }
        );
    }

    #[test]
    fn test_serde_tagging() {
        let json = serde_json::to_string(&Prediction::Indefinite {
            reason: IndefiniteReason::NoDrift,
        })
        .unwrap();
        assert_eq!(json, r#"{"kind":"indefinite","reason":"no_drift"}"#);
        assert_eq!(
            serde_json::to_string(&Prediction::NotConfigured).unwrap(),
            r#"{"kind":"not_configured"}"#
        );
    }
}
