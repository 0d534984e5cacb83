// Sensor Health Testdata - Signal patterns
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Signal pattern building blocks.
//!
//! Patterns are evaluated at a continuous time coordinate `t` and can be
//! summed with `Composite` to build realistic sensor behaviour.

use crate::error::{Result, TestdataError};
use rand::prelude::*;
use rand_distr::Normal;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Signal pattern definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SignalPattern {
    /// Constant value.
    Constant { value: f64 },

    /// Sinusoidal wave.
    ///
    /// `value = offset + amplitude * sin(2*PI*t/period + phase)`
    Sine {
        amplitude: f64,
        period: f64,
        phase: f64,
        offset: f64,
    },

    /// Linear trend.
    ///
    /// `value = start + slope * t`
    Linear { start: f64, slope: f64 },

    /// Zero-mean Gaussian noise.
    WhiteNoise { std: f64 },

    /// Random walk (Brownian motion). Needs [`PatternState`].
    RandomWalk { start: f64, step_std: f64 },

    /// Step function. Levels are `(t, value)` pairs; each value persists
    /// until the next `t`.
    Step { levels: Vec<(f64, f64)> },

    /// Sum of patterns.
    Composite(Vec<SignalPattern>),
}

impl SignalPattern {
    /// Evaluate the pattern at time `t`.
    ///
    /// Stateful patterns (RandomWalk) fall back to `start` plus one step;
    /// use [`PatternState::evaluate`] for a true walk.
    pub fn evaluate(&self, t: f64, rng: &mut (impl Rng + ?Sized)) -> Result<f64> {
        let value = match self {
            SignalPattern::Constant { value } => *value,

            SignalPattern::Sine {
                amplitude,
                period,
                phase,
                offset,
            } => offset + amplitude * (2.0 * PI * t / period + phase).sin(),

            SignalPattern::Linear { start, slope } => start + slope * t,

            SignalPattern::WhiteNoise { std } => gaussian(*std, "std")?.sample(rng),

            SignalPattern::RandomWalk { start, step_std } => {
                start + gaussian(*step_std, "step_std")?.sample(rng)
            }

            SignalPattern::Step { levels } => {
                let mut current = levels.first().map(|(_, v)| *v).unwrap_or(0.0);
                for (at, level) in levels {
                    if t >= *at {
                        current = *level;
                    } else {
                        break;
                    }
                }
                current
            }

            SignalPattern::Composite(patterns) => {
                let mut sum = 0.0;
                for pattern in patterns {
                    sum += pattern.evaluate(t, rng)?;
                }
                sum
            }
        };
        Ok(value)
    }

    /// Sine with period `2*PI`, i.e. `amplitude * sin(frequency * t)`.
    pub fn sine(amplitude: f64, frequency: f64) -> Self {
        SignalPattern::Sine {
            amplitude,
            period: 2.0 * PI / frequency,
            phase: 0.0,
            offset: 0.0,
        }
    }

    /// Gaussian noise with the given standard deviation.
    pub fn noise(std: f64) -> Self {
        SignalPattern::WhiteNoise { std }
    }

    /// Random walk from `start` with Gaussian steps.
    pub fn random_walk(start: f64, step_std: f64) -> Self {
        SignalPattern::RandomWalk { start, step_std }
    }
}

/// State for patterns that need history.
#[derive(Debug, Clone, Default)]
pub struct PatternState {
    /// Current value of each random walk, in depth-first pattern order.
    walks: Vec<f64>,
}

impl PatternState {
    /// Create state initialised for a pattern.
    pub fn for_pattern(pattern: &SignalPattern) -> Self {
        let mut walks = Vec::new();
        collect_walk_starts(pattern, &mut walks);
        Self { walks }
    }

    /// Evaluate `pattern`, advancing any random walks it contains.
    pub fn evaluate(
        &mut self,
        pattern: &SignalPattern,
        t: f64,
        rng: &mut (impl Rng + ?Sized),
    ) -> Result<f64> {
        let mut cursor = 0;
        self.evaluate_at(pattern, t, rng, &mut cursor)
    }

    fn evaluate_at(
        &mut self,
        pattern: &SignalPattern,
        t: f64,
        rng: &mut (impl Rng + ?Sized),
        cursor: &mut usize,
    ) -> Result<f64> {
        match pattern {
            SignalPattern::RandomWalk { step_std, .. } => {
                let step = gaussian(*step_std, "step_std")?.sample(rng);
                let slot = self
                    .walks
                    .get_mut(*cursor)
                    .ok_or(TestdataError::invalid("step_std", *step_std, "walk state missing"))?;
                *slot += step;
                *cursor += 1;
                Ok(*slot)
            }
            SignalPattern::Composite(patterns) => {
                let mut sum = 0.0;
                for p in patterns {
                    sum += self.evaluate_at(p, t, rng, cursor)?;
                }
                Ok(sum)
            }
            _ => pattern.evaluate(t, rng),
        }
    }
}

fn collect_walk_starts(pattern: &SignalPattern, out: &mut Vec<f64>) {
    match pattern {
        SignalPattern::RandomWalk { start, .. } => out.push(*start),
        SignalPattern::Composite(patterns) => {
            for p in patterns {
                collect_walk_starts(p, out);
            }
        }
        _ => {}
    }
}

pub(crate) fn gaussian(std: f64, name: &'static str) -> Result<Normal<f64>> {
    Normal::new(0.0, std).map_err(|_| TestdataError::invalid(name, std, "must be finite and >= 0"))
}
