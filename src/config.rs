//! Configuration types for sensor health analysis
//!
//! Every struct derives `Default` and is `#[serde(default)]`, so a partial
//! JSON document only needs the fields it overrides.

use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};

/// Default drift-rate boundary (units per sample).
pub const DEFAULT_SLOPE_THRESHOLD: f64 = 0.1;
/// Default offset boundary.
pub const DEFAULT_BIAS_LIMIT: f64 = 2.0;
/// Default SNR floor in dB.
pub const DEFAULT_SNR_FLOOR_DB: f64 = 15.0;
/// Default per-edge normalized loop-area boundary.
pub const DEFAULT_HYSTERESIS_LIMIT: f64 = 0.05;
/// Default DFA exponent boundary.
pub const DEFAULT_HURST_LIMIT: f64 = 0.8;
/// Default points deducted per violated rule.
pub const DEFAULT_RULE_PENALTY: f64 = 20.0;

/// Per-rule violation boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// `|slope|` above this is drift.
    pub slope_threshold: f64,
    /// `|bias - bias_reference|` above this is an offset.
    pub bias_limit: f64,
    /// Nominal level the bias is compared against.
    pub bias_reference: f64,
    /// SNR below this is noise.
    #[serde(alias = "noise_tolerance")]
    pub snr_floor_db: f64,
    /// Loop area above this is mechanical lag.
    pub hysteresis_limit: f64,
    /// DFA exponent above this is instability.
    pub hurst_limit: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            slope_threshold: DEFAULT_SLOPE_THRESHOLD,
            bias_limit: DEFAULT_BIAS_LIMIT,
            bias_reference: 0.0,
            snr_floor_db: DEFAULT_SNR_FLOOR_DB,
            hysteresis_limit: DEFAULT_HYSTERESIS_LIMIT,
            hurst_limit: DEFAULT_HURST_LIMIT,
        }
    }
}

impl Thresholds {
    pub fn with_slope_threshold(mut self, value: f64) -> Self {
        self.slope_threshold = value;
        self
    }

    pub fn with_bias_limit(mut self, value: f64) -> Self {
        self.bias_limit = value;
        self
    }

    pub fn with_bias_reference(mut self, value: f64) -> Self {
        self.bias_reference = value;
        self
    }

    pub fn with_snr_floor_db(mut self, value: f64) -> Self {
        self.snr_floor_db = value;
        self
    }

    pub fn with_hysteresis_limit(mut self, value: f64) -> Self {
        self.hysteresis_limit = value;
        self
    }

    pub fn with_hurst_limit(mut self, value: f64) -> Self {
        self.hurst_limit = value;
        self
    }

    /// All limits finite and strictly positive; reference finite.
    pub fn validate(&self) -> Result<()> {
        positive("slope_threshold", self.slope_threshold)?;
        positive("bias_limit", self.bias_limit)?;
        finite("bias_reference", self.bias_reference)?;
        positive("snr_floor_db", self.snr_floor_db)?;
        positive("hysteresis_limit", self.hysteresis_limit)?;
        positive("hurst_limit", self.hurst_limit)?;
        Ok(())
    }
}

/// Thresholds plus the score penalty applied per violation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub thresholds: Thresholds,
    pub rule_penalty: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            rule_penalty: DEFAULT_RULE_PENALTY,
        }
    }
}

impl ScoringConfig {
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_rule_penalty(mut self, penalty: f64) -> Self {
        self.rule_penalty = penalty;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()?;
        positive("rule_penalty", self.rule_penalty)
    }
}

/// Failure boundary used for remaining-useful-life extrapolation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulBaseline {
    /// Level at which the sensor is considered failed.
    pub critical_threshold: f64,
    /// Seconds between consecutive samples.
    pub sample_interval_seconds: f64,
    /// Healthy operating level; the failure side is the side of
    /// `critical_threshold` facing away from it.
    pub nominal_level: f64,
}

impl Default for RulBaseline {
    fn default() -> Self {
        Self {
            critical_threshold: DEFAULT_BIAS_LIMIT,
            sample_interval_seconds: 1.0,
            nominal_level: 0.0,
        }
    }
}

impl RulBaseline {
    pub fn new(critical_threshold: f64, sample_interval_seconds: f64) -> Self {
        Self {
            critical_threshold,
            sample_interval_seconds,
            ..Default::default()
        }
    }

    pub fn with_nominal_level(mut self, level: f64) -> Self {
        self.nominal_level = level;
        self
    }

    /// Whether `level` sits on the failed side of the threshold (inclusive).
    pub fn is_failed(&self, level: f64) -> bool {
        if self.critical_threshold > self.nominal_level {
            level >= self.critical_threshold
        } else {
            level <= self.critical_threshold
        }
    }

    /// +1 when failure lies above nominal, -1 when below.
    pub fn failure_direction(&self) -> f64 {
        if self.critical_threshold > self.nominal_level {
            1.0
        } else {
            -1.0
        }
    }

    pub fn validate(&self) -> Result<()> {
        finite("critical_threshold", self.critical_threshold)?;
        finite("nominal_level", self.nominal_level)?;
        positive("sample_interval_seconds", self.sample_interval_seconds)?;
        if self.critical_threshold == self.nominal_level {
            return Err(AnalysisError::invalid_config(
                "critical_threshold",
                self.critical_threshold,
                "must differ from nominal_level",
            ));
        }
        Ok(())
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub scoring: ScoringConfig,
    /// RUL is only projected when a baseline is configured.
    pub rul: Option<RulBaseline>,
}

impl AnalysisConfig {
    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn with_rul(mut self, baseline: RulBaseline) -> Self {
        self.rul = Some(baseline);
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.scoring.validate()?;
        if let Some(rul) = &self.rul {
            rul.validate()?;
        }
        Ok(())
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

fn finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AnalysisError::invalid_config(field, value, "must be finite"))
    }
}

fn positive(field: &'static str, value: f64) -> Result<()> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(AnalysisError::invalid_config(field, value, "must be > 0"))
    }
}
