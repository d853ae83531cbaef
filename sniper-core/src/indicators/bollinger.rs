//! Bollinger Bands — SMA middle band ± multiplier × population std dev.
//!
//! Computed over the trailing `period` values; with fewer values the window
//! degrades to whatever is available (never an error). Empty input → all
//! zeros. Population std dev (divide by N), so lower ≤ middle ≤ upper always
//! holds for non-negative multipliers.

use serde::{Deserialize, Serialize};

/// The three bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl BollingerBands {
    pub fn neutral() -> Self {
        Self {
            upper: 0.0,
            middle: 0.0,
            lower: 0.0,
        }
    }
}

/// Bands over the trailing `period` values of `values`.
pub fn bollinger(values: &[f64], period: usize, multiplier: f64) -> BollingerBands {
    if values.is_empty() || period == 0 {
        return BollingerBands::neutral();
    }

    let window = &values[values.len().saturating_sub(period)..];
    let n = window.len() as f64;
    let mean = window.iter().sum::<f64>() / n;
    let variance = window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std = variance.sqrt();

    BollingerBands {
        upper: mean + std * multiplier,
        middle: mean,
        lower: mean - std * multiplier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn empty_input_is_neutral() {
        assert_eq!(bollinger(&[], 20, 2.0), BollingerBands::neutral());
    }

    #[test]
    fn flat_series_collapses_bands() {
        let b = bollinger(&[75.0; 30], 20, 2.0);
        assert_approx(b.upper, 75.0, DEFAULT_EPSILON);
        assert_approx(b.middle, 75.0, DEFAULT_EPSILON);
        assert_approx(b.lower, 75.0, DEFAULT_EPSILON);
    }

    #[test]
    fn known_window() {
        // Window [2, 4, 6]: mean 4, population variance 8/3, std ~1.632993
        let b = bollinger(&[2.0, 4.0, 6.0], 3, 2.0);
        assert_approx(b.middle, 4.0, DEFAULT_EPSILON);
        assert_approx(b.upper, 4.0 + 2.0 * (8.0f64 / 3.0).sqrt(), 1e-9);
        assert_approx(b.lower, 4.0 - 2.0 * (8.0f64 / 3.0).sqrt(), 1e-9);
    }

    #[test]
    fn short_series_uses_available_window() {
        let b = bollinger(&[74.0, 76.0], 20, 2.0);
        assert_approx(b.middle, 75.0, DEFAULT_EPSILON);
        assert!(b.upper > b.middle && b.lower < b.middle);
    }

    #[test]
    fn ordering_holds() {
        let values = [75.0, 74.2, 76.1, 75.5, 73.9, 77.0, 74.8];
        let b = bollinger(&values, 5, 2.0);
        assert!(b.lower <= b.middle && b.middle <= b.upper);
    }
}
