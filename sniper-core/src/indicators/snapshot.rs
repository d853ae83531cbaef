//! One atomic recompute of the full indicator set.
//!
//! The engine replaces its snapshot wholesale on every new bar; fields are
//! never updated individually, so a snapshot is always internally consistent
//! with the bar history that produced it.

use super::{atr, bollinger, ema, macd, pivot_points, rsi, vwap};
use super::{BollingerBands, Macd, PivotPoints};
use crate::domain::Bar;
use serde::{Deserialize, Serialize};

/// Indicator periods and windows. Part of the engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndicatorConfig {
    pub ema_short: usize,
    pub ema_long: usize,
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bollinger_period: usize,
    pub bollinger_multiplier: f64,
    pub vwap_window: usize,
    pub atr_period: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            ema_short: 9,
            ema_long: 21,
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger_period: 20,
            bollinger_multiplier: 2.0,
            vwap_window: 20,
            atr_period: 14,
        }
    }
}

/// Derived indicator values for the bar history's current tail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub ema_short: f64,
    pub ema_long: f64,
    pub rsi: f64,
    pub macd: Macd,
    pub bollinger: BollingerBands,
    pub vwap: f64,
    pub atr: f64,
    pub pivots: PivotPoints,
}

impl IndicatorSnapshot {
    /// Neutral snapshot for an engine that has seen no bars yet.
    pub fn neutral() -> Self {
        Self {
            ema_short: 0.0,
            ema_long: 0.0,
            rsi: 50.0,
            macd: Macd::neutral(),
            bollinger: BollingerBands::neutral(),
            vwap: 0.0,
            atr: 0.0,
            pivots: PivotPoints::neutral(),
        }
    }

    /// Recompute everything from the given bar history.
    pub fn compute(bars: &[Bar], config: &IndicatorConfig) -> Self {
        let Some(last) = bars.last() else {
            return Self::neutral();
        };
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

        Self {
            ema_short: ema(&closes, config.ema_short),
            ema_long: ema(&closes, config.ema_long),
            rsi: rsi(&closes, config.rsi_period),
            macd: macd(
                &closes,
                config.macd_fast,
                config.macd_slow,
                config.macd_signal,
            ),
            bollinger: bollinger(&closes, config.bollinger_period, config.bollinger_multiplier),
            vwap: vwap(bars, config.vwap_window),
            atr: atr(bars, config.atr_period),
            pivots: pivot_points(last.high, last.low, last.close),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars;

    #[test]
    fn empty_history_is_neutral() {
        let snap = IndicatorSnapshot::compute(&[], &IndicatorConfig::default());
        assert_eq!(snap, IndicatorSnapshot::neutral());
        assert_eq!(snap.rsi, 50.0);
    }

    #[test]
    fn snapshot_is_deterministic() {
        let closes: Vec<f64> = (0..120).map(|i| 75.0 + (i as f64 * 0.3).sin()).collect();
        let bars = make_bars(&closes);
        let config = IndicatorConfig::default();
        let a = IndicatorSnapshot::compute(&bars, &config);
        let b = IndicatorSnapshot::compute(&bars, &config);
        assert_eq!(a, b);
    }

    #[test]
    fn snapshot_pivots_track_last_bar() {
        let bars = make_bars(&[74.0, 75.0, 76.0]);
        let snap = IndicatorSnapshot::compute(&bars, &IndicatorConfig::default());
        let last = bars.last().unwrap();
        let expected = (last.high + last.low + last.close) / 3.0;
        assert!((snap.pivots.pivot - expected).abs() < 1e-12);
    }

    #[test]
    fn long_history_populates_all_fields() {
        let closes: Vec<f64> = (0..200).map(|i| 75.0 + (i as f64 * 0.1).sin()).collect();
        let bars = make_bars(&closes);
        let snap = IndicatorSnapshot::compute(&bars, &IndicatorConfig::default());
        assert!(snap.ema_short > 0.0);
        assert!(snap.ema_long > 0.0);
        assert!(snap.atr > 0.0);
        assert!(snap.vwap > 0.0);
        assert!(snap.bollinger.lower <= snap.bollinger.upper);
    }
}
