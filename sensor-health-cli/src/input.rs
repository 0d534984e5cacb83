// Sensor Health CLI - Sample input parsing
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Reading sample sequences from files or stdin.
//!
//! Three layouts are accepted: a JSON array of numbers (`null` marks a gap),
//! a CSV file with a header row, or plain numbers separated by whitespace
//! or commas. Gaps become NaN so the strict path rejects them and the
//! lenient path drops them.

use crate::error::{CliError, Result};
use clap::ValueEnum;
use std::io::Read;
use std::path::Path;

/// Path meaning "read from stdin".
pub const STDIN: &str = "-";

/// Column headers skipped when picking a CSV value column.
const TIME_COLUMNS: &[&str] = &["timestamp", "timestamp_ms", "time", "t"];

/// Input layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum InputFormat {
    /// Pick from the file extension, then from the content.
    #[default]
    Auto,
    Json,
    Csv,
    Text,
}

impl InputFormat {
    fn resolve(self, source: &str, content: &str) -> InputFormat {
        if self != InputFormat::Auto {
            return self;
        }
        let ext = Path::new(source)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("json") => InputFormat::Json,
            Some("csv") => InputFormat::Csv,
            _ if content.trim_start().starts_with('[') => InputFormat::Json,
            _ => InputFormat::Text,
        }
    }
}

/// Read samples from `source` (a path, or `-` for stdin).
pub fn read_samples(source: &str, format: InputFormat, column: Option<&str>) -> Result<Vec<f64>> {
    let content = if source == STDIN {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(source)?
    };

    let samples = parse_samples(&content, format.resolve(source, &content), column)?;
    if samples.is_empty() {
        return Err(CliError::EmptyInput(source.to_string()));
    }
    Ok(samples)
}

/// Parse `content` in an already resolved format.
pub fn parse_samples(content: &str, format: InputFormat, column: Option<&str>) -> Result<Vec<f64>> {
    match format {
        InputFormat::Json => parse_json(content),
        InputFormat::Csv => parse_csv(content, column),
        InputFormat::Text | InputFormat::Auto => parse_text(content),
    }
}

fn parse_json(content: &str) -> Result<Vec<f64>> {
    let values: Vec<Option<f64>> = serde_json::from_str(content)?;
    Ok(values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}

fn parse_text(content: &str) -> Result<Vec<f64>> {
    content
        .split(|c: char| c.is_whitespace() || c == ',' || c == ';')
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(i, token)| {
            token.parse::<f64>().map_err(|_| {
                CliError::InvalidFormat(format!("token {} is not a number: {:?}", i, token))
            })
        })
        .collect()
}

fn parse_csv(content: &str, column: Option<&str>) -> Result<Vec<f64>> {
    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let headers = reader.headers()?.clone();

    let index = match column {
        Some(name) => headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| CliError::InvalidFormat(format!("no column named {:?}", name)))?,
        None => headers
            .iter()
            .position(|h| !TIME_COLUMNS.contains(&h.trim().to_ascii_lowercase().as_str()))
            .ok_or_else(|| CliError::InvalidFormat("no value column in CSV header".to_string()))?,
    };

    let mut samples = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let cell = record.get(index).map(str::trim).unwrap_or("");
        if cell.is_empty() {
            samples.push(f64::NAN);
            continue;
        }
        let value = cell.parse::<f64>().map_err(|_| {
            CliError::InvalidFormat(format!("row {}: {:?} is not a number", row + 1, cell))
        })?;
        samples.push(value);
    }
    Ok(samples)
}
