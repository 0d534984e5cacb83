//! Diagnosis rule table.
//!
//! Rules are evaluated in table order. Every violated rule costs score
//! points and is reported as a flag; the first violated rule supplies the
//! diagnosis and recommendation.

use crate::config::Thresholds;
use crate::metrics::AnalysisMetrics;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a violated rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleFlag {
    SlopeDrift,
    BiasOffset,
    LowSnr,
    Hysteresis,
    HurstInstability,
}

impl RuleFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleFlag::SlopeDrift => "SLOPE_DRIFT",
            RuleFlag::BiasOffset => "BIAS_OFFSET",
            RuleFlag::LowSnr => "LOW_SNR",
            RuleFlag::Hysteresis => "HYSTERESIS",
            RuleFlag::HurstInstability => "HURST_INSTABILITY",
        }
    }
}

/// A single row of the diagnosis table.
#[derive(Clone, Copy)]
pub struct DiagnosisRule {
    pub flag: RuleFlag,
    /// Returns true when the metrics violate this rule.
    pub predicate: fn(&AnalysisMetrics, &Thresholds) -> bool,
    pub diagnosis: &'static str,
    pub recommendation: &'static str,
}

impl fmt::Debug for DiagnosisRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosisRule")
            .field("flag", &self.flag)
            .field("diagnosis", &self.diagnosis)
            .finish_non_exhaustive()
    }
}

impl DiagnosisRule {
    pub fn is_violated(&self, metrics: &AnalysisMetrics, thresholds: &Thresholds) -> bool {
        (self.predicate)(metrics, thresholds)
    }
}

pub const NORMAL_DIAGNOSIS: &str = "Sensor Operating Normally";
pub const NORMAL_RECOMMENDATION: &str = "No action required. Continue routine monitoring.";

/// Rules in priority order.
pub const DIAGNOSIS_RULES: &[DiagnosisRule] = &[
    DiagnosisRule {
        flag: RuleFlag::SlopeDrift,
        predicate: |m, t| m.slope.abs() > t.slope_threshold,
        diagnosis: "Critical Trend Drift",
        recommendation: "Schedule recalibration within 7 days.",
    },
    DiagnosisRule {
        flag: RuleFlag::BiasOffset,
        predicate: |m, t| (m.bias - t.bias_reference).abs() > t.bias_limit,
        diagnosis: "Calibration Offset Detected",
        recommendation:
            "Verify the zero point against a reference standard and re-zero the sensor.",
    },
    DiagnosisRule {
        flag: RuleFlag::LowSnr,
        predicate: |m, t| m.snr_db < t.snr_floor_db,
        diagnosis: "High Noise Level",
        recommendation: "Inspect wiring, shielding and grounding for interference sources.",
    },
    DiagnosisRule {
        flag: RuleFlag::Hysteresis,
        predicate: |m, t| m.hysteresis > t.hysteresis_limit,
        diagnosis: "Mechanical Play/Lag Detected",
        recommendation: "Inspect mechanical linkages and the actuator for backlash or wear.",
    },
    DiagnosisRule {
        flag: RuleFlag::HurstInstability,
        predicate: |m, t| m.hurst > t.hurst_limit,
        diagnosis: "Loss of Signal Stability",
        recommendation: "Review process conditions and verify sensor mounting; readings show persistent correlated wandering.",
    },
];

/// Violated rules in priority order.
pub fn evaluate(metrics: &AnalysisMetrics, thresholds: &Thresholds) -> Vec<&'static DiagnosisRule> {
    DIAGNOSIS_RULES
        .iter()
        .filter(|rule| rule.is_violated(metrics, thresholds))
        .collect()
}
