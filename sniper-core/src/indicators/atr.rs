//! Average True Range (ATR).
//!
//! True range: max(high-low, |high-prev_close|, |low-prev_close|).
//! ATR is the simple mean of the trailing `period` true ranges, which needs
//! `period + 1` bars (each TR consumes the previous close).
//! Sentinel: 0.0 when history is shorter than period + 1.

use crate::domain::Bar;

/// ATR over the trailing `period` true ranges.
pub fn atr(bars: &[Bar], period: usize) -> f64 {
    if period == 0 || bars.len() < period + 1 {
        return 0.0;
    }

    let start = bars.len() - period;
    let mut sum = 0.0;
    for i in start..bars.len() {
        let high = bars[i].high;
        let low = bars[i].low;
        let prev_close = bars[i - 1].close;
        let tr = (high - low)
            .max((high - prev_close).abs())
            .max((low - prev_close).abs());
        sum += tr;
    }

    sum / period as f64
}
