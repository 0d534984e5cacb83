//! Analyzer facade
//!
//! Holds a validated [`AnalysisConfig`] and runs the metrics and scoring
//! engines back to back.

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::metrics::{compute_metrics, AnalysisMetrics, SummaryStats};
use crate::samples::preprocess;
use crate::scoring::{score, AnalysisResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Metrics and the assessment derived from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub metrics: AnalysisMetrics,
    pub result: AnalysisResult,
}

impl Analysis {
    /// Fitted trend value for every analysed sample.
    pub fn trend(&self) -> Vec<f64> {
        self.metrics.trend_fit().trend(self.metrics.sample_count)
    }

    /// `samples[i]` minus the fitted trend.
    pub fn residuals(&self, samples: &[f64]) -> Vec<f64> {
        self.metrics.trend_fit().residuals(samples)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Runs metrics and scoring with one configuration.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalysisConfig,
}

impl Analyzer {
    /// Create an analyzer, rejecting invalid configuration up front.
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyse `samples` using the lag-1 phase portrait for hysteresis.
    pub fn analyze(&self, samples: &[f64]) -> Result<Analysis> {
        self.run(samples, None)
    }

    /// Analyse `x` with an explicit `y` series for hysteresis.
    pub fn analyze_paired(&self, x: &[f64], y: &[f64]) -> Result<Analysis> {
        self.run(x, Some(y))
    }

    /// Drop non-finite samples, then analyse what remains.
    pub fn analyze_lenient(&self, samples: &[f64]) -> Result<Analysis> {
        let cleaned = preprocess(samples);
        self.analyze(&cleaned.values)
    }

    /// Like [`analyze`](Self::analyze), but a window that is too short
    /// yields an `Unknown` result instead of an error.
    pub fn assess(&self, samples: &[f64]) -> Result<AnalysisResult> {
        match self.analyze(samples) {
            Ok(analysis) => Ok(analysis.result),
            Err(err) if err.is_insufficient_data() => {
                debug!(error = %err, "window too short, reporting unknown");
                Ok(AnalysisResult::insufficient_data())
            }
            Err(err) => Err(err),
        }
    }

    /// Distribution summary of `samples`.
    pub fn summarize(&self, samples: &[f64]) -> Result<SummaryStats> {
        crate::samples::validate_samples(samples)?;
        SummaryStats::compute(samples)
    }

    fn run(&self, samples: &[f64], paired_y: Option<&[f64]>) -> Result<Analysis> {
        let metrics = compute_metrics(samples, paired_y)?;
        let result = score(&metrics, &self.config.scoring, self.config.rul.as_ref())?;
        Ok(Analysis { metrics, result })
    }
}
