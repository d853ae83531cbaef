//! Auxiliary market inputs consumed by the non-technical scores.

use serde::{Deserialize, Serialize};

/// Fundamental, positioning, and sentiment inputs for one analysis cycle.
///
/// Supplied by the feed adapter via `SniperEngine::update_context`; the engine
/// holds the latest record and reuses it until replaced. The scorer clamps
/// every field into its documented range before use, so a sloppy upstream
/// cannot push a score outside [0,1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketContext {
    /// Last bar volume (contracts).
    pub volume: f64,
    /// Open interest (contracts).
    pub open_interest: f64,
    /// Implied volatility as a fraction (0.25 = 25%).
    pub implied_volatility: f64,
    /// Front-month vs next-month spread; positive = contango.
    pub contango: f64,
    /// Inventory level, normalized to 0-100.
    pub inventory_level: f64,
    /// Dollar index (DXY).
    pub dollar_index: f64,
    /// Geopolitical risk factor in [0, 1].
    pub geopolitical_risk: f64,
    /// External sentiment reading in [0, 1].
    pub sentiment: f64,
}

impl MarketContext {
    /// Neutral context: every derived score lands on its baseline.
    pub fn neutral() -> Self {
        Self {
            volume: 0.0,
            open_interest: 0.0,
            implied_volatility: 0.25,
            contango: 0.0,
            inventory_level: 50.0,
            dollar_index: 90.0,
            geopolitical_risk: 0.0,
            sentiment: 0.5,
        }
    }
}

impl Default for MarketContext {
    fn default() -> Self {
        Self::neutral()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_context_roundtrips() {
        let ctx = MarketContext::neutral();
        let json = serde_json::to_string(&ctx).unwrap();
        let deser: MarketContext = serde_json::from_str(&json).unwrap();
        assert_eq!(ctx, deser);
    }
}
