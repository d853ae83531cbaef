//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * x[t] + (1 - alpha) * EMA[t-1], alpha = 2/(period+1).
//! Seed: SMA of the first `period` values.
//! Sentinel: 0.0 when the series is shorter than `period` (or period is 0).

/// Latest EMA value over the whole series.
pub fn ema(values: &[f64], period: usize) -> f64 {
    if period == 0 || values.len() < period {
        return 0.0;
    }

    let alpha = 2.0 / (period as f64 + 1.0);
    let mut ema = values[..period].iter().sum::<f64>() / period as f64;
    for &v in &values[period..] {
        ema = (v - ema) * alpha + ema;
    }
    ema
}

/// Full EMA series, NaN before the seed index.
///
/// Used by the MACD signal line, which needs the EMA of the MACD-line series
/// rather than a single terminal value.
pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if period == 0 || n < period {
        return result;
    }

    let alpha = 2.0 / (period as f64 + 1.0);
    let seed = values[..period].iter().sum::<f64>() / period as f64;
    result[period - 1] = seed;

    let mut prev = seed;
    for i in period..n {
        let e = (values[i] - prev) * alpha + prev;
        result[i] = e;
        prev = e;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn ema_short_series_returns_sentinel() {
        assert_eq!(ema(&[75.0, 75.5], 9), 0.0);
        assert_eq!(ema(&[], 9), 0.0);
    }

    #[test]
    fn ema_period_1_equals_last_value() {
        assert_approx(ema(&[10.0, 20.0, 30.0], 1), 30.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_3_known_values() {
        // alpha = 0.5; seed = SMA(10,11,12) = 11
        // EMA = 0.5*13 + 0.5*11 = 12; then 0.5*14 + 0.5*12 = 13
        assert_approx(ema(&[10.0, 11.0, 12.0, 13.0, 14.0], 3), 13.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_series_last_matches_scalar() {
        let values = [10.0, 11.0, 12.0, 13.0, 14.0, 15.0];
        let series = ema_series(&values, 3);
        assert!(series[0].is_nan());
        assert!(series[1].is_nan());
        assert_approx(*series.last().unwrap(), ema(&values, 3), DEFAULT_EPSILON);
    }

    #[test]
    fn ema_flat_series_equals_level() {
        let flat = [75.0; 40];
        assert_approx(ema(&flat, 9), 75.0, DEFAULT_EPSILON);
    }
}
