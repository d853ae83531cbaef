//! Bar — the fundamental market data unit, plus the bounded history it lives in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV observation for the traded instrument.
///
/// Immutable once created. Bars are appended to a [`BarHistory`] by the feed
/// adapter; the engine never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Bar {
    /// Returns true if any OHLC field is NaN (void bar).
    pub fn is_void(&self) -> bool {
        self.open.is_nan() || self.high.is_nan() || self.low.is_nan() || self.close.is_nan()
    }

    /// Basic OHLC sanity check: high is the ceiling, low the floor, prices positive.
    pub fn is_sane(&self) -> bool {
        if self.is_void() {
            return false;
        }
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.open > 0.0
            && self.close > 0.0
    }

    /// Typical price (H+L+C)/3, the VWAP input.
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }
}

/// Bounded, ordered bar series. Oldest bars are evicted once `capacity` is
/// exceeded, so indicator windows always see a fresh tail.
#[derive(Debug, Clone)]
pub struct BarHistory {
    bars: Vec<Bar>,
    capacity: usize,
}

impl BarHistory {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 1, "bar history capacity must be >= 1");
        Self {
            bars: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append one bar, evicting the oldest if over capacity.
    pub fn push(&mut self, bar: Bar) {
        self.bars.push(bar);
        if self.bars.len() > self.capacity {
            self.bars.remove(0);
        }
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn latest(&self) -> Option<&Bar> {
        self.bars.last()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}
