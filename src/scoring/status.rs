//! Score-to-status banding.

use serde::{Deserialize, Serialize};

/// Severity band of a health score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Score in the top band
    Normal,
    /// Degraded but serviceable
    Warning,
    /// Needs intervention
    Critical,
    /// No usable score
    #[default]
    Unknown,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Normal => "normal",
            HealthStatus::Warning => "warning",
            HealthStatus::Critical => "critical",
            HealthStatus::Unknown => "unknown",
        }
    }

    /// Normal or Warning.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Normal | Self::Warning)
    }

    /// Band for `score`. Non-finite scores are `Unknown`.
    pub fn from_score(score: f64) -> Self {
        if !score.is_finite() {
            return HealthStatus::Unknown;
        }
        STATUS_BANDS
            .iter()
            .find(|band| score >= band.min_score)
            .map(|band| band.status)
            .unwrap_or(HealthStatus::Critical)
    }
}

/// One row of the banding table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusBand {
    /// Inclusive lower bound.
    pub min_score: f64,
    pub status: HealthStatus,
}

/// Bands in descending order of `min_score`; the first match wins.
pub const STATUS_BANDS: &[StatusBand] = &[
    StatusBand {
        min_score: 80.0,
        status: HealthStatus::Normal,
    },
    StatusBand {
        min_score: 50.0,
        status: HealthStatus::Warning,
    },
    StatusBand {
        min_score: 0.0,
        status: HealthStatus::Critical,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(HealthStatus::from_score(100.0), HealthStatus::Normal);
        assert_eq!(HealthStatus::from_score(80.0), HealthStatus::Normal);
        assert_eq!(HealthStatus::from_score(79.999), HealthStatus::Warning);
        assert_eq!(HealthStatus::from_score(50.0), HealthStatus::Warning);
        assert_eq!(HealthStatus::from_score(49.999), HealthStatus::Critical);
        assert_eq!(HealthStatus::from_score(0.0), HealthStatus::Critical);
    }

    #[test]
    fn test_non_finite_unknown() {
        assert_eq!(HealthStatus::from_score(f64::NAN), HealthStatus::Unknown);
        assert_eq!(HealthStatus::from_score(f64::INFINITY), HealthStatus::Unknown);
    }

    #[test]
    fn test_bands_descending() {
        assert!(STATUS_BANDS
            .windows(2)
            .all(|w| w[0].min_score > w[1].min_score));
    }

    #[test]
    fn test_default_unknown() {
        assert_eq!(HealthStatus::default(), HealthStatus::Unknown);
        assert!(!HealthStatus::Unknown.is_ok());
        assert!(HealthStatus::Warning.is_ok());
    }

    #[test]
    fn test_serde_matches_as_str() {
        for status in [
            HealthStatus::Normal,
            HealthStatus::Warning,
            HealthStatus::Critical,
            HealthStatus::Unknown,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }
}
