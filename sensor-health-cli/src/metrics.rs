// Sensor Health CLI - Prometheus metrics definitions
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Prometheus metrics for CLI runs.
//!
//! Counters and a duration histogram updated per analysis. They are
//! dumped in text exposition format when `--metrics` is passed.

use crate::error::Result;
use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec, register_histogram, CounterVec, Encoder, Histogram, TextEncoder,
};
use sensor_health::HealthStatus;

lazy_static! {
    /// Completed analyses, labeled by resulting status.
    pub static ref ANALYSES_TOTAL: CounterVec = register_counter_vec!(
        "sensor_health_analyses_total",
        "Completed analyses by health status",
        &["status"]
    ).unwrap();

    /// Analyses that produced no result, labeled by error kind.
    pub static ref ANALYSIS_FAILURES_TOTAL: CounterVec = register_counter_vec!(
        "sensor_health_analysis_failures_total",
        "Failed analyses by error kind",
        &["kind"]
    ).unwrap();

    /// Wall time of a single analysis.
    pub static ref ANALYSIS_DURATION_SECONDS: Histogram = register_histogram!(
        "sensor_health_analysis_duration_seconds",
        "Time spent analyzing one sample window",
        vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]
    ).unwrap();
}

/// Record a finished analysis.
pub fn record_analysis(status: HealthStatus, duration_secs: f64) {
    ANALYSES_TOTAL.with_label_values(&[status.as_str()]).inc();
    ANALYSIS_DURATION_SECONDS.observe(duration_secs);
}

/// Record a failed analysis.
pub fn record_failure(kind: &str) {
    ANALYSIS_FAILURES_TOTAL.with_label_values(&[kind]).inc();
}

/// Encode all metrics in Prometheus text format.
pub fn encode_metrics() -> Result<String> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_analysis() {
        let before = ANALYSES_TOTAL.with_label_values(&["warning"]).get();
        record_analysis(HealthStatus::Warning, 0.002);
        let after = ANALYSES_TOTAL.with_label_values(&["warning"]).get();
        assert_eq!(after - before, 1.0);
    }

    #[test]
    fn test_encode_metrics() {
        record_analysis(HealthStatus::Normal, 0.001);
        record_failure("insufficient_data");

        let output = encode_metrics().unwrap();
        assert!(output.contains("sensor_health_analyses_total"));
        assert!(output.contains("sensor_health_analysis_failures_total"));
        assert!(output.contains("sensor_health_analysis_duration_seconds"));
    }
}
