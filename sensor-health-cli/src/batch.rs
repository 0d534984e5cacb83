// Sensor Health CLI - Concurrent batch analysis
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Batch analysis of many input files.
//!
//! Each input runs on the blocking pool under a per-job timeout, with at
//! most `jobs` inputs in flight. A job that fails or times out still
//! produces an entry carrying an `Unknown` result.

use crate::error::{CliError, Result};
use crate::input::{read_samples, InputFormat};
use crate::metrics::{record_analysis, record_failure};
use sensor_health::{preprocess, AnalysisResult, Analyzer};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

/// How a batch job ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchOutcome {
    Ok,
    Failed,
    Timeout,
}

impl BatchOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchOutcome::Ok => "ok",
            BatchOutcome::Failed => "failed",
            BatchOutcome::Timeout => "timeout",
        }
    }
}

/// One line of batch output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEntry {
    pub input: String,
    pub outcome: BatchOutcome,
    pub result: AnalysisResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchEntry {
    fn failed(input: String, err: &CliError) -> Self {
        Self {
            input,
            outcome: BatchOutcome::Failed,
            result: AnalysisResult::unknown("Analysis failed", "Check the input data"),
            error: Some(err.to_string()),
        }
    }

    fn timed_out(input: String, timeout: Duration) -> Self {
        Self {
            input,
            outcome: BatchOutcome::Timeout,
            result: AnalysisResult::unknown(
                "Analysis timed out",
                "Retry with a shorter window or a longer timeout",
            ),
            error: Some(format!("exceeded {:.1}s", timeout.as_secs_f64())),
        }
    }
}

/// Batch settings.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Maximum concurrent jobs.
    pub jobs: usize,
    /// Per-job timeout.
    pub timeout: Duration,
    pub format: InputFormat,
    pub column: Option<String>,
    /// Drop non-finite samples instead of failing.
    pub lenient: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            jobs: 4,
            timeout: Duration::from_secs(30),
            format: InputFormat::Auto,
            column: None,
            lenient: false,
        }
    }
}

/// Read one input and assess it.
fn assess_input(
    analyzer: &Analyzer,
    source: &str,
    format: InputFormat,
    column: Option<&str>,
    lenient: bool,
) -> Result<AnalysisResult> {
    let samples = read_samples(source, format, column)?;
    let result = if lenient {
        analyzer.assess(&preprocess(&samples).values)?
    } else {
        analyzer.assess(&samples)?
    };
    Ok(result)
}

/// Analyse every input, preserving input order in the output.
pub async fn run_batch(
    analyzer: Arc<Analyzer>,
    inputs: Vec<String>,
    options: BatchOptions,
) -> Vec<BatchEntry> {
    let semaphore = Arc::new(Semaphore::new(options.jobs.max(1)));
    let options = Arc::new(options);

    let handles: Vec<_> = inputs
        .into_iter()
        .map(|input| {
            let analyzer = Arc::clone(&analyzer);
            let semaphore = Arc::clone(&semaphore);
            let options = Arc::clone(&options);
            let task_input = input.clone();
            let handle =
                tokio::spawn(async move { run_job(analyzer, semaphore, options, task_input).await });
            (input, handle)
        })
        .collect();

    let mut entries = Vec::with_capacity(handles.len());
    for (input, handle) in handles {
        match handle.await {
            Ok(entry) => {
                debug!(input = %entry.input, outcome = entry.outcome.as_str(), "batch entry");
                entries.push(entry);
            }
            Err(err) => {
                warn!(input = %input, error = %err, "batch task aborted");
                let err = CliError::Worker(err.to_string());
                record_failure(err.kind());
                entries.push(BatchEntry::failed(input, &err));
            }
        }
    }
    entries
}

/// Run `work` on the blocking pool while holding a permit from `semaphore`.
///
/// The permit moves into the blocking task, so a job that outlives its
/// timeout still counts against the limit until it returns. `Ok(None)`
/// means the timeout elapsed first.
async fn run_limited<T, F>(
    semaphore: Arc<Semaphore>,
    timeout: Duration,
    work: F,
) -> Result<Option<T>>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let permit = semaphore
        .acquire_owned()
        .await
        .map_err(|err| CliError::Worker(err.to_string()))?;

    let job = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        work()
    });

    match tokio::time::timeout(timeout, job).await {
        Ok(Ok(value)) => Ok(Some(value)),
        Ok(Err(join_err)) => Err(CliError::Worker(join_err.to_string())),
        Err(_) => Ok(None),
    }
}

async fn run_job(
    analyzer: Arc<Analyzer>,
    semaphore: Arc<Semaphore>,
    options: Arc<BatchOptions>,
    input: String,
) -> BatchEntry {
    let job_input = input.clone();
    let job_options = Arc::clone(&options);
    let job = run_limited(semaphore, options.timeout, move || {
        let started = Instant::now();
        let result = assess_input(
            &analyzer,
            &job_input,
            job_options.format,
            job_options.column.as_deref(),
            job_options.lenient,
        );
        (result, started.elapsed())
    });

    match job.await {
        Ok(Some((Ok(result), elapsed))) => {
            record_analysis(result.status, elapsed.as_secs_f64());
            debug!(input = %input, status = result.status.as_str(), "batch job finished");
            BatchEntry {
                input,
                outcome: BatchOutcome::Ok,
                result,
                error: None,
            }
        }
        Ok(Some((Err(err), _))) => {
            warn!(input = %input, error = %err, "batch job failed");
            record_failure(err.kind());
            BatchEntry::failed(input, &err)
        }
        Ok(None) => {
            warn!(input = %input, timeout_secs = options.timeout.as_secs_f64(), "batch job timed out");
            record_failure("timeout");
            BatchEntry::timed_out(input, options.timeout)
        }
        Err(err) => {
            warn!(input = %input, error = %err, "batch worker failed");
            record_failure(err.kind());
            BatchEntry::failed(input, &err)
        }
    }
}
