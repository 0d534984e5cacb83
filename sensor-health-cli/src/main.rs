// Sensor Health CLI - Command-line front end
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! # Sensor Health CLI
//!
//! Analyse sensor sample windows from files or stdin.
//!
//! ## Usage
//!
//! ```bash
//! # Analyse a JSON array, CSV column or plain list of numbers
//! sensor-health analyze readings.json --pretty
//! sensor-health analyze log.csv --column temperature --lenient
//!
//! # Project remaining useful life towards a failure level of 80.0
//! sensor-health analyze readings.txt --critical-threshold 80 --sample-interval 60
//!
//! # Generate a synthetic window and pipe it back in
//! sensor-health synth --kind drifting --length 200 --seed 7 | sensor-health analyze -
//!
//! # Analyse many files concurrently
//! sensor-health batch a.json b.json c.json --jobs 4 --timeout-secs 10
//! ```
//!
//! Results are printed as JSON on stdout. Logs go to stderr.

mod batch;
mod error;
mod input;
mod metrics;

use batch::{run_batch, BatchOptions};
use clap::{Parser, Subcommand};
use error::{CliError, Result};
use input::{read_samples, InputFormat};
use metrics::{encode_metrics, record_analysis, record_failure};
use sensor_health::{preprocess, AnalysisConfig, AnalysisMetrics, AnalysisResult, Analyzer};
use sensor_health_testdata::{generate_synthetic, SyntheticKind};
use serde::Serialize;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn, Level};
use tracing_subscriber::EnvFilter;

/// Sensor signal analysis and health scoring
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// Print Prometheus metrics to stderr on exit
    #[arg(long, global = true)]
    metrics: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyse one sample window
    Analyze(AnalyzeArgs),
    /// Print a synthetic sample window as a JSON array
    Synth(SynthArgs),
    /// Analyse several inputs concurrently
    Batch(BatchArgs),
}

/// Options shared by `analyze` and `batch`.
#[derive(clap::Args, Debug)]
struct EngineArgs {
    /// JSON configuration file (missing fields take defaults)
    #[arg(long)]
    config: Option<String>,

    /// Failure level for remaining-useful-life projection
    #[arg(long)]
    critical_threshold: Option<f64>,

    /// Healthy operating level of the sensor
    #[arg(long)]
    nominal_level: Option<f64>,

    /// Seconds between consecutive samples
    #[arg(long)]
    sample_interval: Option<f64>,

    /// Input layout
    #[arg(long, value_enum, default_value_t = InputFormat::Auto)]
    format: InputFormat,

    /// CSV column holding the samples
    #[arg(long)]
    column: Option<String>,

    /// Drop NaN and missing samples instead of failing
    #[arg(long)]
    lenient: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(clap::Args, Debug)]
struct AnalyzeArgs {
    /// Input file, or `-` for stdin
    input: String,

    /// Second series for hysteresis (same length as the input)
    #[arg(long)]
    paired: Option<String>,

    #[command(flatten)]
    engine: EngineArgs,
}

#[derive(clap::Args, Debug)]
struct SynthArgs {
    /// Signal behaviour (normal, drifting, noisy, oscillation)
    #[arg(long, default_value = "normal")]
    kind: SyntheticKind,

    /// Number of samples
    #[arg(long, default_value = "100")]
    length: usize,

    /// Random seed (omit for a fresh draw)
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(clap::Args, Debug)]
struct BatchArgs {
    /// Input files
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Per-input timeout in seconds
    #[arg(long, default_value = "30")]
    timeout_secs: f64,

    /// Maximum inputs analysed at once
    #[arg(long, default_value = "4")]
    jobs: usize,

    #[command(flatten)]
    engine: EngineArgs,
}

/// Output of `analyze`. Metrics are absent when the window was too short.
#[derive(Debug, Serialize)]
struct AnalyzeReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    metrics: Option<AnalysisMetrics>,
    result: AnalysisResult,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match args.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN,
        };
        EnvFilter::from_default_env().add_directive(level.into())
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Sensor Health v{}", env!("CARGO_PKG_VERSION"));

    let status = match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            record_failure(err.kind());
            error!(kind = err.kind(), "{}", err);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    };

    if args.metrics {
        match encode_metrics() {
            Ok(text) => eprint!("{}", text),
            Err(err) => error!("Failed to encode metrics: {}", err),
        }
    }

    status
}

async fn run(args: &Args) -> Result<()> {
    match &args.command {
        Command::Analyze(cmd) => analyze(cmd),
        Command::Synth(cmd) => synth(cmd),
        Command::Batch(cmd) => batch(cmd).await,
    }
}

/// Load `--config` and apply flag overrides on top.
fn load_config(engine: &EngineArgs) -> Result<AnalysisConfig> {
    let mut config = match &engine.config {
        Some(path) => AnalysisConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => AnalysisConfig::default(),
    };

    let wants_rul = engine.critical_threshold.is_some()
        || engine.nominal_level.is_some()
        || engine.sample_interval.is_some();
    if wants_rul {
        let mut baseline = config.rul.unwrap_or_default();
        if let Some(threshold) = engine.critical_threshold {
            baseline.critical_threshold = threshold;
        }
        if let Some(level) = engine.nominal_level {
            baseline.nominal_level = level;
        }
        if let Some(interval) = engine.sample_interval {
            baseline.sample_interval_seconds = interval;
        }
        config.rul = Some(baseline);
    }

    debug!(?config, "configuration loaded");
    Ok(config)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}

fn analyze(cmd: &AnalyzeArgs) -> Result<()> {
    let engine = &cmd.engine;
    let analyzer = Analyzer::new(load_config(engine)?)?;
    let column = engine.column.as_deref();

    let mut samples = read_samples(&cmd.input, engine.format, column)?;
    let mut paired = match &cmd.paired {
        Some(path) => Some(read_samples(path, engine.format, column)?),
        None => None,
    };

    if engine.lenient {
        match paired.take() {
            Some(y) => {
                // Keep only positions where both series are finite.
                let (kept_x, kept_y): (Vec<f64>, Vec<f64>) = samples
                    .iter()
                    .zip(y.iter())
                    .filter(|(x, y)| x.is_finite() && y.is_finite())
                    .map(|(x, y)| (*x, *y))
                    .unzip();
                if kept_x.len() < samples.len() {
                    warn!(dropped = samples.len() - kept_x.len(), "dropped non-finite pairs");
                }
                samples = kept_x;
                paired = Some(kept_y);
            }
            None => samples = preprocess(&samples).values,
        }
    }

    let started = Instant::now();
    let outcome = match &paired {
        Some(y) => analyzer.analyze_paired(&samples, y),
        None => analyzer.analyze(&samples),
    };

    let report = match outcome {
        Ok(analysis) => AnalyzeReport {
            metrics: Some(analysis.metrics),
            result: analysis.result,
        },
        Err(err) if err.is_insufficient_data() => {
            info!(error = %err, "window too short");
            AnalyzeReport {
                metrics: None,
                result: AnalysisResult::insufficient_data(),
            }
        }
        Err(err) => return Err(err.into()),
    };
    record_analysis(report.result.status, started.elapsed().as_secs_f64());

    print_json(&report, engine.pretty)
}

fn synth(cmd: &SynthArgs) -> Result<()> {
    let samples = generate_synthetic(cmd.kind, cmd.length, cmd.seed)?;
    debug!(kind = cmd.kind.as_str(), length = samples.len(), "generated synthetic window");
    print_json(&samples, false)
}

async fn batch(cmd: &BatchArgs) -> Result<()> {
    let engine = &cmd.engine;
    if !cmd.timeout_secs.is_finite() || cmd.timeout_secs <= 0.0 {
        return Err(CliError::InvalidArgument(format!(
            "--timeout-secs must be > 0, got {}",
            cmd.timeout_secs
        )));
    }
    let timeout = Duration::try_from_secs_f64(cmd.timeout_secs).map_err(|err| {
        CliError::InvalidArgument(format!("--timeout-secs {}: {}", cmd.timeout_secs, err))
    })?;

    let analyzer = Arc::new(Analyzer::new(load_config(engine)?)?);
    let options = BatchOptions {
        jobs: cmd.jobs,
        timeout,
        format: engine.format,
        column: engine.column.clone(),
        lenient: engine.lenient,
    };

    info!(inputs = cmd.inputs.len(), jobs = options.jobs, "starting batch");
    let entries = run_batch(analyzer, cmd.inputs.clone(), options).await;
    print_json(&entries, engine.pretty)
}
