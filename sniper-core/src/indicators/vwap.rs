//! Volume-Weighted Average Price (VWAP).
//!
//! Typical price (H+L+C)/3 weighted by volume over the trailing `window`
//! bars. Sentinel: 0.0 when cumulative volume is zero (degenerate market) or
//! the series is empty.

use crate::domain::Bar;

/// VWAP over the trailing `window` bars.
pub fn vwap(bars: &[Bar], window: usize) -> f64 {
    if bars.is_empty() || window == 0 {
        return 0.0;
    }

    let tail = &bars[bars.len().saturating_sub(window)..];
    let mut cum_volume = 0.0;
    let mut cum_price_volume = 0.0;
    for bar in tail {
        let v = bar.volume as f64;
        cum_price_volume += bar.typical_price() * v;
        cum_volume += v;
    }

    if cum_volume > 0.0 {
        cum_price_volume / cum_volume
    } else {
        0.0
    }
}
