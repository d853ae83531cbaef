//! Indicator library — pure functions over an ordered bar/close series.
//!
//! Every function is deterministic, side-effect-free, and total: insufficient
//! or degenerate input yields a documented neutral sentinel (EMA → 0,
//! RSI → 50, ATR → 0, VWAP → 0, MACD → zeros), never a panic or an error.
//! Callers treat sentinels as a degraded-but-non-fatal result.
//!
//! [`snapshot::IndicatorSnapshot`] bundles one atomic recompute of the full
//! set for the engine's analysis cycle.

pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod pivot;
pub mod rsi;
pub mod snapshot;
pub mod vwap;

pub use atr::atr;
pub use bollinger::{bollinger, BollingerBands};
pub use ema::{ema, ema_series};
pub use macd::{macd, Macd};
pub use pivot::{pivot_points, PivotPoints};
pub use rsi::rsi;
pub use snapshot::{IndicatorConfig, IndicatorSnapshot};
pub use vwap::vwap;

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLV: open = prev close (or close for the first bar),
/// high/low bracket open and close by 0.05, volume = 50_000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<crate::domain::Bar> {
    use crate::domain::Bar;
    let base = chrono::DateTime::from_timestamp(1_700_000_000, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                timestamp: base + chrono::Duration::minutes(i as i64),
                open,
                high: open.max(close) + 0.05,
                low: open.min(close) - 0.05,
                close,
                volume: 50_000,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
