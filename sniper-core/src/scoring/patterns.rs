//! Pattern labels attached to entry signals.

use crate::indicators::IndicatorSnapshot;

/// Recognized chart/indicator setups at the moment of entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternTag {
    BullishEmaCross,
    RsiOversold,
    RsiOverbought,
    MacdBullish,
    BollingerLong,
    BollingerShort,
    AboveResistance2,
    BelowSupport2,
}

impl PatternTag {
    pub fn label(&self) -> &'static str {
        match self {
            PatternTag::BullishEmaCross => "BULLISH_EMA_CROSS",
            PatternTag::RsiOversold => "RSI_OVERSOLD",
            PatternTag::RsiOverbought => "RSI_OVERBOUGHT",
            PatternTag::MacdBullish => "MACD_BULLISH",
            PatternTag::BollingerLong => "BOLLINGER_SQUEEZE_LONG",
            PatternTag::BollingerShort => "BOLLINGER_SQUEEZE_SHORT",
            PatternTag::AboveResistance2 => "ABOVE_RESISTANCE_2",
            PatternTag::BelowSupport2 => "BELOW_SUPPORT_2",
        }
    }
}

/// All patterns active for the given snapshot and price.
pub fn detect(snapshot: &IndicatorSnapshot, price: f64) -> Vec<PatternTag> {
    let mut tags = Vec::new();

    if snapshot.ema_short > snapshot.ema_long {
        tags.push(PatternTag::BullishEmaCross);
    }

    if snapshot.rsi < 30.0 {
        tags.push(PatternTag::RsiOversold);
    } else if snapshot.rsi > 70.0 {
        tags.push(PatternTag::RsiOverbought);
    }

    if snapshot.macd.histogram > 0.0 && snapshot.macd.value > snapshot.macd.signal {
        tags.push(PatternTag::MacdBullish);
    }

    if price < snapshot.bollinger.lower {
        tags.push(PatternTag::BollingerLong);
    } else if price > snapshot.bollinger.upper {
        tags.push(PatternTag::BollingerShort);
    }

    if price > snapshot.pivots.r2 {
        tags.push(PatternTag::AboveResistance2);
    } else if price < snapshot.pivots.s2 {
        tags.push(PatternTag::BelowSupport2);
    }

    tags
}

/// Joined label for an entry, or the fallback when nothing matched.
pub fn entry_label(tags: &[PatternTag]) -> String {
    if tags.is_empty() {
        return "EXTERNAL_SIGNAL".to_string();
    }
    tags.iter()
        .map(|t| t.label())
        .collect::<Vec<_>>()
        .join(" + ")
}
