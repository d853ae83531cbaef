//! Relative Strength Index (RSI).
//!
//! Average gain / average loss over the trailing `period` close-to-close
//! changes, RSI = 100 - 100 / (1 + avg_gain / avg_loss).
//! Sentinels: 50 (neutral) when history < period + 1 closes; 100 when the
//! average loss is zero (no division by zero).

/// RSI over the trailing `period` changes of `values`.
pub fn rsi(values: &[f64], period: usize) -> f64 {
    if period == 0 || values.len() < period + 1 {
        return 50.0;
    }

    let mut gains = 0.0;
    let mut losses = 0.0;
    let start = values.len() - period;
    for i in start..values.len() {
        let change = values[i] - values[i - 1];
        if change > 0.0 {
            gains += change;
        } else {
            losses -= change;
        }
    }

    let avg_gain = gains / period as f64;
    let avg_loss = losses / period as f64;

    if avg_loss == 0.0 {
        return 100.0;
    }

    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}
