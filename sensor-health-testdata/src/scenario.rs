// Sensor Health Testdata - Synthetic scenarios
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Preset sensor behaviours.
//!
//! Every preset shares the same base `10 * sin(t)` over `t` in `[0, 10]`
//! and adds one characteristic disturbance on top.

use crate::error::{Result, TestdataError};
use crate::generator::{generate, GeneratorConfig};
use crate::patterns::SignalPattern;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Amplitude of the shared base sine.
pub const BASE_AMPLITUDE: f64 = 10.0;

/// Preset signal behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyntheticKind {
    /// Base signal plus mild noise.
    #[default]
    Normal,
    /// Base signal plus a linear ramp of 5 units across the window.
    Drifting,
    /// Base signal buried in heavy noise.
    Noisy,
    /// Base signal plus a fast secondary oscillation.
    Oscillation,
}

impl SyntheticKind {
    pub const ALL: [SyntheticKind; 4] = [
        SyntheticKind::Normal,
        SyntheticKind::Drifting,
        SyntheticKind::Noisy,
        SyntheticKind::Oscillation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SyntheticKind::Normal => "normal",
            SyntheticKind::Drifting => "drifting",
            SyntheticKind::Noisy => "noisy",
            SyntheticKind::Oscillation => "oscillation",
        }
    }

    /// Pattern evaluated over `t` in `[0, 10]`.
    pub fn pattern(&self) -> SignalPattern {
        let base = SignalPattern::sine(BASE_AMPLITUDE, 1.0);
        let extra = match self {
            SyntheticKind::Normal => vec![SignalPattern::noise(0.5)],
            SyntheticKind::Drifting => vec![
                SignalPattern::noise(0.5),
                SignalPattern::Linear {
                    start: 0.0,
                    slope: 0.5,
                },
            ],
            SyntheticKind::Noisy => vec![SignalPattern::noise(3.0)],
            SyntheticKind::Oscillation => vec![
                SignalPattern::sine(5.0, 10.0),
                SignalPattern::noise(0.2),
            ],
        };
        let mut parts = vec![base];
        parts.extend(extra);
        SignalPattern::Composite(parts)
    }
}

impl fmt::Display for SyntheticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SyntheticKind {
    type Err = TestdataError;

    fn from_str(s: &str) -> Result<Self> {
        SyntheticKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| TestdataError::UnknownKind(s.to_string()))
    }
}

/// Generate `length` samples of `kind`.
pub fn generate_synthetic(kind: SyntheticKind, length: usize, seed: Option<u64>) -> Result<Vec<f64>> {
    let mut config = GeneratorConfig::new().with_num_samples(length);
    config.seed = seed;
    generate(&config, &kind.pattern())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!("drifting".parse::<SyntheticKind>().unwrap(), SyntheticKind::Drifting);
        assert_eq!("NOISY".parse::<SyntheticKind>().unwrap(), SyntheticKind::Noisy);
        assert!(matches!(
            "wobbly".parse::<SyntheticKind>(),
            Err(TestdataError::UnknownKind(_))
        ));
    }

    #[test]
    fn test_display_roundtrip() {
        for kind in SyntheticKind::ALL {
            assert_eq!(kind.to_string().parse::<SyntheticKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_lengths() {
        for kind in SyntheticKind::ALL {
            assert_eq!(generate_synthetic(kind, 100, Some(1)).unwrap().len(), 100);
        }
    }

    #[test]
    fn test_drifting_ends_higher() {
        let samples = generate_synthetic(SyntheticKind::Drifting, 200, Some(3)).unwrap();
        let normal = generate_synthetic(SyntheticKind::Normal, 200, Some(3)).unwrap();
        // Same seed, same noise draws; only the ramp differs
        let diff = samples[199] - normal[199];
        assert!((diff - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&SyntheticKind::Oscillation).unwrap(),
            "\"oscillation\""
        );
    }
}
