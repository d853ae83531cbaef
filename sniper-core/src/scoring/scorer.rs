//! Signal scorer — indicator readings plus auxiliary factors in, one
//! confidence value and a directional bias out.
//!
//! Every score starts from a 0.5 baseline and applies additive adjustments,
//! clamped to [0,1]. The combined confidence is a weighted sum of the
//! technical score and the composite external signal; weights come from the
//! engine config and are validated to sum to 1.

use super::context::MarketContext;
use super::factors::ConfidenceFactors;
use crate::indicators::IndicatorSnapshot;
use serde::{Deserialize, Serialize};

/// Directional bias of the technical picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bias {
    Bullish,
    Bearish,
    Neutral,
}

/// Technical score plus the bullish/bearish adjustment tallies behind it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TechnicalRead {
    pub score: f64,
    pub bullish_hits: u32,
    pub bearish_hits: u32,
}

impl TechnicalRead {
    pub fn bias(&self) -> Bias {
        match self.bullish_hits.cmp(&self.bearish_hits) {
            std::cmp::Ordering::Greater => Bias::Bullish,
            std::cmp::Ordering::Less => Bias::Bearish,
            std::cmp::Ordering::Equal => Bias::Neutral,
        }
    }
}

/// Full outcome of one scoring pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreReport {
    pub factors: ConfidenceFactors,
    /// Composite of the five factors (the non-technical signal source).
    pub external_signal: f64,
    /// technical * w_technical + external * w_external.
    pub confidence: f64,
    pub bias: Bias,
}

/// Technical score: EMA crossover, RSI extremes, MACD histogram, Bollinger breach.
pub fn technical_score(snapshot: &IndicatorSnapshot, price: f64) -> TechnicalRead {
    let mut score: f64 = 0.5;
    let mut bullish = 0;
    let mut bearish = 0;

    if snapshot.ema_short > snapshot.ema_long {
        score += 0.1;
        bullish += 1;
    } else {
        score -= 0.1;
        bearish += 1;
    }

    if snapshot.rsi < 30.0 {
        score += 0.15; // oversold, mean-reversion long
        bullish += 1;
    } else if snapshot.rsi > 70.0 {
        score -= 0.15; // overbought
        bearish += 1;
    }

    if snapshot.macd.histogram > 0.0 {
        score += 0.1;
        bullish += 1;
    } else {
        score -= 0.1;
        bearish += 1;
    }

    if price < snapshot.bollinger.lower {
        score += 0.15;
        bullish += 1;
    } else if price > snapshot.bollinger.upper {
        score -= 0.15;
        bearish += 1;
    }

    TechnicalRead {
        score: score.clamp(0.0, 1.0),
        bullish_hits: bullish,
        bearish_hits: bearish,
    }
}

/// Fundamental score: inventories and the dollar weigh against oil,
/// geopolitical risk and backwardation for it.
pub fn fundamental_score(context: &MarketContext) -> f64 {
    let mut score = 0.5;

    let inventory = context.inventory_level.clamp(0.0, 100.0);
    score -= (inventory / 100.0) * 0.2;

    score -= ((context.dollar_index - 90.0) / 10.0) * 0.15;

    score += context.geopolitical_risk.clamp(0.0, 1.0) * 0.3;

    if context.contango > 0.0 {
        score -= 0.1;
    } else {
        score += 0.1;
    }

    score.clamp(0.0, 1.0)
}

/// Correlation score: volume, open interest, and implied-vol confirmation.
pub fn correlation_score(context: &MarketContext) -> f64 {
    let mut score: f64 = 0.5;

    if context.volume > 50_000.0 {
        score += 0.1;
    }
    if context.open_interest > 300_000.0 {
        score += 0.1;
    }
    if context.implied_volatility > 0.3 {
        score += 0.15;
    } else if context.implied_volatility < 0.2 {
        score -= 0.1;
    }

    score.clamp(0.0, 1.0)
}

/// Volatility score: ATR as a percentage of price, bucketed. Higher realized
/// volatility means more opportunity. Degenerate price or ATR lands in the
/// low bucket rather than producing NaN.
pub fn volatility_score(snapshot: &IndicatorSnapshot, price: f64) -> f64 {
    if price <= 0.0 || snapshot.atr <= 0.0 {
        return 0.4;
    }
    let atr_percent = snapshot.atr / price * 100.0;
    if atr_percent > 2.0 {
        0.8
    } else if atr_percent > 1.5 {
        0.7
    } else if atr_percent > 1.0 {
        0.6
    } else {
        0.4
    }
}

/// One full scoring pass over the current snapshot and context.
///
/// `technical_weight` and `external_weight` come from the engine config,
/// which guarantees they sum to 1.
pub fn score(
    snapshot: &IndicatorSnapshot,
    context: &MarketContext,
    price: f64,
    technical_weight: f64,
    external_weight: f64,
) -> ScoreReport {
    let technical = technical_score(snapshot, price);
    let factors = ConfidenceFactors::new(
        technical.score,
        fundamental_score(context),
        context.sentiment,
        correlation_score(context),
        volatility_score(snapshot, price),
    );
    let external_signal = factors.composite();
    let confidence =
        (technical.score * technical_weight + external_signal * external_weight).clamp(0.0, 1.0);

    ScoreReport {
        factors,
        external_signal,
        confidence,
        bias: technical.bias(),
    }
}
