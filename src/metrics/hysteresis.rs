//! Phase-portrait loop area.
//!
//! The paired points `(x_k, y_k)` are walked in sample order and closed
//! back onto the first point. The signed shoelace area of that polygon is
//! made dimensionless by dividing by `range(x) * range(y)`, then averaged
//! over the polygon's edges so the value does not grow with window length.

use super::Metric;
use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};

/// Minimum paired points for a non-trivial polygon.
pub const MIN_HYSTERESIS_POINTS: usize = 3;

/// Ranges narrower than this are treated as flat.
pub const RANGE_EPSILON: f64 = 1e-9;

/// Loop area plus the series it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HysteresisLoop {
    /// `|shoelace area| / (range_x * range_y * edges)`.
    pub area: f64,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// Loop area of the lag-1 phase portrait `(x[i], x[i+1])`.
pub fn lag_hysteresis(samples: &[f64]) -> Result<HysteresisLoop> {
    let required = MIN_HYSTERESIS_POINTS + 1;
    if samples.len() < required {
        return Err(AnalysisError::insufficient(
            Metric::Hysteresis,
            required,
            samples.len(),
        ));
    }
    let x = samples[..samples.len() - 1].to_vec();
    let y = samples[1..].to_vec();
    let area = loop_area(&x, &y);
    Ok(HysteresisLoop { area, x, y })
}

/// Loop area of an explicit `(x, y)` pair, e.g. input against output.
pub fn paired_hysteresis(x: &[f64], y: &[f64]) -> Result<HysteresisLoop> {
    if x.len() != y.len() {
        return Err(AnalysisError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    if x.len() < MIN_HYSTERESIS_POINTS {
        return Err(AnalysisError::insufficient(
            Metric::Hysteresis,
            MIN_HYSTERESIS_POINTS,
            x.len(),
        ));
    }
    Ok(HysteresisLoop {
        area: loop_area(x, y),
        x: x.to_vec(),
        y: y.to_vec(),
    })
}

/// Signed shoelace area of the closed polyline through `(x_k, y_k)`.
pub fn shoelace_area(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 3 {
        return 0.0;
    }
    let mut twice_area = 0.0;
    for k in 0..n {
        let next = (k + 1) % n;
        twice_area += x[k] * y[next] - x[next] * y[k];
    }
    twice_area / 2.0
}

fn loop_area(x: &[f64], y: &[f64]) -> f64 {
    let range_x = range(x);
    let range_y = range(y);
    if range_x < RANGE_EPSILON || range_y < RANGE_EPSILON {
        return 0.0;
    }
    // Shift to the lower-left corner so large offsets don't swamp the cross products.
    let x0 = min(x);
    let y0 = min(y);
    let xs: Vec<f64> = x.iter().map(|v| v - x0).collect();
    let ys: Vec<f64> = y.iter().map(|v| v - y0).collect();
    // Closed polygon: one edge per point
    let edges = xs.len() as f64;
    shoelace_area(&xs, &ys).abs() / (range_x * range_y * edges)
}

fn min(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

fn range(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    max - min(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_shoelace_unit_square() {
        let x = [0.0, 1.0, 1.0, 0.0];
        let y = [0.0, 0.0, 1.0, 1.0];
        assert_abs_diff_eq!(shoelace_area(&x, &y), 1.0);
        // Clockwise traversal flips the sign
        let x_cw = [0.0, 0.0, 1.0, 1.0];
        let y_cw = [0.0, 1.0, 1.0, 0.0];
        assert_abs_diff_eq!(shoelace_area(&x_cw, &y_cw), -1.0);
    }

    #[test]
    fn test_paired_square_normalized() {
        // Area 6 over range 2*3, spread across 4 edges
        let x = [0.0, 2.0, 2.0, 0.0];
        let y = [0.0, 0.0, 3.0, 3.0];
        let lp = paired_hysteresis(&x, &y).unwrap();
        assert_abs_diff_eq!(lp.area, 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_offset_invariance() {
        let x = [0.0, 2.0, 2.0, 0.0];
        let y = [0.0, 0.0, 3.0, 3.0];
        let xs: Vec<f64> = x.iter().map(|v| v + 1e6).collect();
        let ys: Vec<f64> = y.iter().map(|v| v - 5e5).collect();
        let a = paired_hysteresis(&x, &y).unwrap().area;
        let b = paired_hysteresis(&xs, &ys).unwrap().area;
        assert_abs_diff_eq!(a, b, epsilon = 1e-9);
    }

    #[test]
    fn test_constant_signal_zero_area() {
        let lp = lag_hysteresis(&[4.2; 30]).unwrap();
        assert_eq!(lp.area, 0.0);
        assert_eq!(lp.x.len(), 29);
        assert_eq!(lp.y.len(), 29);
    }

    #[test]
    fn test_line_has_no_loop() {
        let samples: Vec<f64> = (0..40).map(|i| i as f64).collect();
        let lp = lag_hysteresis(&samples).unwrap();
        assert_abs_diff_eq!(lp.area, 0.0, epsilon = 1e-12);
    }

    fn circle(points_per_turn: usize, turns: usize) -> (Vec<f64>, Vec<f64>) {
        let step = 2.0 * PI / points_per_turn as f64;
        (0..points_per_turn * turns)
            .map(|k| ((k as f64 * step).cos(), (k as f64 * step).sin()))
            .unzip()
    }

    #[test]
    fn test_quarter_turn_circle() {
        // Four quarter-turn points: square of area 2 over range 2*2, 4 edges
        let (x, y) = circle(4, 1);
        let lp = paired_hysteresis(&x, &y).unwrap();
        assert_abs_diff_eq!(lp.area, 0.125, epsilon = 1e-12);
    }

    #[test]
    fn test_area_independent_of_turns() {
        let (x1, y1) = circle(16, 1);
        let (x10, y10) = circle(16, 10);
        let one = paired_hysteresis(&x1, &y1).unwrap().area;
        let ten = paired_hysteresis(&x10, &y10).unwrap().area;
        assert!(one > 0.0);
        assert_abs_diff_eq!(one, ten, epsilon = 1e-9);
    }

    #[test]
    fn test_lag_oscillation_independent_of_length() {
        let wave = |n: usize| -> Vec<f64> {
            (0..n).map(|k| (2.0 * PI * k as f64 / 8.0).sin()).collect()
        };
        let short = lag_hysteresis(&wave(65)).unwrap().area;
        let long = lag_hysteresis(&wave(6401)).unwrap().area;
        assert_abs_diff_eq!(short, long, epsilon = 2e-3);
    }

    #[test]
    fn test_lag_series_populated() {
        let lp = lag_hysteresis(&[1.0, 2.0, 3.0, 5.0]).unwrap();
        assert_eq!(lp.x, vec![1.0, 2.0, 3.0]);
        assert_eq!(lp.y, vec![2.0, 3.0, 5.0]);
    }

    #[test]
    fn test_length_mismatch() {
        let err = paired_hysteresis(&[1.0, 2.0, 3.0], &[1.0, 2.0]).unwrap_err();
        assert_eq!(err, AnalysisError::LengthMismatch { x: 3, y: 2 });
    }

    #[test]
    fn test_too_short() {
        let err = lag_hysteresis(&[1.0, 2.0, 3.0]).unwrap_err();
        assert!(err.is_insufficient_data());
    }
}
