//! Moving Average Convergence Divergence (MACD).
//!
//! MACD line = EMA(fast) - EMA(slow) of the close series.
//! Signal line = EMA(signal_period) of the MACD-line *series* — the
//! conventional definition. Histogram = MACD - signal.
//!
//! Degraded policies:
//! - fewer than `slow` closes → all zeros;
//! - MACD-line series shorter than `signal_period` → signal = value,
//!   histogram = 0 (the line exists but its EMA is not yet seedable).

use super::ema::{ema, ema_series};
use serde::{Deserialize, Serialize};

/// MACD reading: line value, signal line, histogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Macd {
    pub value: f64,
    pub signal: f64,
    pub histogram: f64,
}

impl Macd {
    pub fn neutral() -> Self {
        Self {
            value: 0.0,
            signal: 0.0,
            histogram: 0.0,
        }
    }
}

/// MACD over `values`. Requires `fast < slow`; the engine config validates this.
pub fn macd(values: &[f64], fast: usize, slow: usize, signal_period: usize) -> Macd {
    if fast == 0 || slow == 0 || signal_period == 0 || fast >= slow || values.len() < slow {
        return Macd::neutral();
    }

    let fast_series = ema_series(values, fast);
    let slow_series = ema_series(values, slow);

    // The MACD line is defined from the slow seed index onward; both EMA
    // series are non-NaN there because fast < slow.
    let line: Vec<f64> = (slow - 1..values.len())
        .map(|i| fast_series[i] - slow_series[i])
        .collect();
    let value = *line.last().expect("line is non-empty when len >= slow");

    if line.len() < signal_period {
        return Macd {
            value,
            signal: value,
            histogram: 0.0,
        };
    }

    let signal = ema(&line, signal_period);
    Macd {
        value,
        signal,
        histogram: value - signal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::assert_approx;

    #[test]
    fn macd_short_series_is_neutral() {
        let m = macd(&[75.0; 10], 12, 26, 9);
        assert_eq!(m, Macd::neutral());
    }

    #[test]
    fn macd_flat_series_is_zero() {
        let m = macd(&[75.0; 60], 12, 26, 9);
        assert_approx(m.value, 0.0, 1e-9);
        assert_approx(m.signal, 0.0, 1e-9);
        assert_approx(m.histogram, 0.0, 1e-9);
    }

    #[test]
    fn macd_uptrend_is_positive() {
        let values: Vec<f64> = (0..60).map(|i| 70.0 + i as f64 * 0.2).collect();
        let m = macd(&values, 12, 26, 9);
        assert!(m.value > 0.0, "fast EMA should lead in an uptrend");
        assert!(m.signal > 0.0);
    }

    #[test]
    fn macd_histogram_flips_on_reversal() {
        // Long uptrend, then a sharp reversal: the line falls through its signal.
        let mut values: Vec<f64> = (0..50).map(|i| 70.0 + i as f64 * 0.2).collect();
        values.extend((0..15).map(|i| 80.0 - i as f64 * 0.5));
        let m = macd(&values, 12, 26, 9);
        assert!(m.histogram < 0.0, "histogram should be negative after reversal");
    }

    #[test]
    fn macd_before_signal_seed_degrades() {
        // Exactly `slow` closes: the line has one point, signal == value.
        let values: Vec<f64> = (0..26).map(|i| 70.0 + i as f64 * 0.1).collect();
        let m = macd(&values, 12, 26, 9);
        assert_eq!(m.signal, m.value);
        assert_eq!(m.histogram, 0.0);
    }

    #[test]
    fn macd_inverted_periods_is_neutral() {
        assert_eq!(macd(&[75.0; 60], 26, 12, 9), Macd::neutral());
    }
}
