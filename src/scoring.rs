//! Scoring and diagnosis engine
//!
//! Reduces an [`AnalysisMetrics`] record to a health score, a status band,
//! a diagnosis with its recommendation, and a remaining-useful-life
//! projection.

pub mod rul;
pub mod rules;
pub mod status;

pub use rul::{predict_rul, IndefiniteReason, Prediction};
pub use rules::{DiagnosisRule, RuleFlag, DIAGNOSIS_RULES};
pub use status::{HealthStatus, StatusBand, STATUS_BANDS};

use crate::config::{RulBaseline, ScoringConfig};
use crate::error::Result;
use crate::metrics::AnalysisMetrics;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Score every window starts from.
pub const MAX_SCORE: f64 = 100.0;

pub const INSUFFICIENT_DATA_DIAGNOSIS: &str = "Insufficient data for analysis";
pub const INSUFFICIENT_DATA_RECOMMENDATION: &str = "Ingest more data points";

/// Health assessment of one sample window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// 0 to 100.
    pub health_score: f64,
    pub status: HealthStatus,
    pub diagnosis: String,
    /// Violated rules in priority order.
    pub flags: Vec<RuleFlag>,
    pub recommendation: String,
    pub prediction: Prediction,
}

impl AnalysisResult {
    /// Result carrying no assessment, e.g. for a window that could not be analysed.
    pub fn unknown(diagnosis: impl Into<String>, recommendation: impl Into<String>) -> Self {
        Self {
            health_score: 0.0,
            status: HealthStatus::Unknown,
            diagnosis: diagnosis.into(),
            flags: Vec::new(),
            recommendation: recommendation.into(),
            prediction: Prediction::NotConfigured,
        }
    }

    /// The "not enough samples" result.
    pub fn insufficient_data() -> Self {
        Self::unknown(INSUFFICIENT_DATA_DIAGNOSIS, INSUFFICIENT_DATA_RECOMMENDATION)
    }

    pub fn has_flag(&self, flag: RuleFlag) -> bool {
        self.flags.contains(&flag)
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

/// Score `metrics` against `config`, projecting RUL when `baseline` is given.
pub fn score(
    metrics: &AnalysisMetrics,
    config: &ScoringConfig,
    baseline: Option<&RulBaseline>,
) -> Result<AnalysisResult> {
    config.validate()?;
    if let Some(baseline) = baseline {
        baseline.validate()?;
    }

    let fired = rules::evaluate(metrics, &config.thresholds);
    let health_score = (MAX_SCORE - config.rule_penalty * fired.len() as f64).max(0.0);
    let status = HealthStatus::from_score(health_score);

    let (diagnosis, recommendation) = match fired.first() {
        Some(rule) => (rule.diagnosis, rule.recommendation),
        None => (rules::NORMAL_DIAGNOSIS, rules::NORMAL_RECOMMENDATION),
    };
    let flags: Vec<RuleFlag> = fired.iter().map(|rule| rule.flag).collect();
    let prediction = predict_rul(metrics, baseline);

    debug!(
        health_score,
        status = status.as_str(),
        flags = ?flags,
        "scored metrics"
    );

    Ok(AnalysisResult {
        health_score,
        status,
        diagnosis: diagnosis.to_string(),
        flags,
        recommendation: recommendation.to_string(),
        prediction,
    })
}
