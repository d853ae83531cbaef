//! Per-cycle confidence sub-scores and their composite.

use serde::{Deserialize, Serialize};

/// Weights for the composite external signal. Fixed, sum to 1.
const TECHNICAL_WEIGHT: f64 = 0.30;
const FUNDAMENTAL_WEIGHT: f64 = 0.25;
const SENTIMENT_WEIGHT: f64 = 0.15;
const CORRELATION_WEIGHT: f64 = 0.15;
const VOLATILITY_WEIGHT: f64 = 0.15;

/// Sub-scores for one analysis cycle, each in [0, 1].
///
/// Produced once per cycle and consumed immediately; clamped at construction
/// so downstream arithmetic never sees an out-of-range factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceFactors {
    pub technical: f64,
    pub fundamental: f64,
    pub sentiment: f64,
    pub correlation: f64,
    pub volatility: f64,
}

impl ConfidenceFactors {
    pub fn new(
        technical: f64,
        fundamental: f64,
        sentiment: f64,
        correlation: f64,
        volatility: f64,
    ) -> Self {
        Self {
            technical: technical.clamp(0.0, 1.0),
            fundamental: fundamental.clamp(0.0, 1.0),
            sentiment: sentiment.clamp(0.0, 1.0),
            correlation: correlation.clamp(0.0, 1.0),
            volatility: volatility.clamp(0.0, 1.0),
        }
    }

    /// The composite external signal: weighted sum of the five factors.
    pub fn composite(&self) -> f64 {
        self.technical * TECHNICAL_WEIGHT
            + self.fundamental * FUNDAMENTAL_WEIGHT
            + self.sentiment * SENTIMENT_WEIGHT
            + self.correlation * CORRELATION_WEIGHT
            + self.volatility * VOLATILITY_WEIGHT
    }
}
