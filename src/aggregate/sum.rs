//! Sequence summation and rounding.
//!
//! This module provides the summation used throughout the tool and the
//! rounding mode that decides whether a total keeps its fractional part.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a computed total is rounded before it is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Return the sum as accumulated.
    #[default]
    Exact,
    /// Drop the fractional part, rounding toward zero.
    TruncateTowardZero,
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundingMode::Exact => write!(f, "exact"),
            RoundingMode::TruncateTowardZero => write!(f, "truncate toward zero"),
        }
    }
}

impl RoundingMode {
    /// Maps a `round_down` switch (config file or `--round-down`) to a mode.
    pub fn from_round_down(round_down: bool) -> Self {
        if round_down {
            RoundingMode::TruncateTowardZero
        } else {
            RoundingMode::Exact
        }
    }

    /// Apply this mode to an already accumulated value.
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            RoundingMode::Exact => value,
            RoundingMode::TruncateTowardZero => value.trunc(),
        }
    }
}

/// Sum a sequence of values in iteration order.
///
/// Accumulation starts at `0.0` and adds one element at a time, so the
/// result is bit-for-bit reproducible for a given ordering. An empty slice
/// sums to `0.0` in either mode.
pub fn sum_of(data: &[f64], mode: RoundingMode) -> f64 {
    let mut result = 0.0;
    for value in data {
        result += *value;
    }

    mode.apply(result)
}

/// A total together with how it was produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of values summed.
    pub count: usize,
    /// The (possibly truncated) total.
    pub sum: f64,
    /// Rounding applied to `sum`.
    pub mode: RoundingMode,
}

impl Summary {
    /// Summarize a sequence under the given rounding mode.
    pub fn of(data: &[f64], mode: RoundingMode) -> Self {
        Self {
            count: data.len(),
            sum: sum_of(data, mode),
            mode,
        }
    }
}
