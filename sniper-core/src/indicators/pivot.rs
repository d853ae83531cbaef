//! Classic floor-trader pivot points from the last completed bar.
//!
//! P = (H + L + C) / 3
//! R1 = 2P - L, S1 = 2P - H
//! R2 = P + (H - L), S2 = P - (H - L)
//! R3 = H + 2(P - L), S3 = L - 2(H - P)

use serde::{Deserialize, Serialize};

/// Pivot levels R3..S3.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PivotPoints {
    pub r3: f64,
    pub r2: f64,
    pub r1: f64,
    pub pivot: f64,
    pub s1: f64,
    pub s2: f64,
    pub s3: f64,
}

impl PivotPoints {
    pub fn neutral() -> Self {
        Self {
            r3: 0.0,
            r2: 0.0,
            r1: 0.0,
            pivot: 0.0,
            s1: 0.0,
            s2: 0.0,
            s3: 0.0,
        }
    }
}

/// Pivots from one bar's high, low, and close.
pub fn pivot_points(high: f64, low: f64, close: f64) -> PivotPoints {
    let pivot = (high + low + close) / 3.0;
    PivotPoints {
        r3: high + 2.0 * (pivot - low),
        r2: pivot + (high - low),
        r1: 2.0 * pivot - low,
        pivot,
        s1: 2.0 * pivot - high,
        s2: pivot - (high - low),
        s3: low - 2.0 * (high - pivot),
    }
}
