// Sensor Health CLI - Command-line front end
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! CLI error type.

use sensor_health::AnalysisError;
use sensor_health_testdata::TestdataError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

/// Errors surfaced by the command-line front end.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Testdata(#[from] TestdataError),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No samples in {0}")]
    EmptyInput(String),

    #[error("Prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),

    #[error("Worker failed: {0}")]
    Worker(String),
}

impl CliError {
    /// Label used for the failure counter.
    pub fn kind(&self) -> &'static str {
        match self {
            CliError::Io(_) => "io",
            CliError::Csv(_) | CliError::Json(_) | CliError::InvalidFormat(_) => "input_format",
            CliError::Analysis(err) => err.kind(),
            CliError::Testdata(_) => "testdata",
            CliError::InvalidArgument(_) => "invalid_argument",
            CliError::EmptyInput(_) => "empty_input",
            CliError::Prometheus(_) => "metrics",
            CliError::Worker(_) => "worker",
        }
    }
}
