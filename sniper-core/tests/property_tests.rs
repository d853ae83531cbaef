//! Property tests for indicator and scoring invariants.
//!
//! Uses proptest to verify:
//! 1. RSI stays in [0, 100] and degrades to 50 on short input
//! 2. Bollinger bands stay ordered: lower <= middle <= upper
//! 3. Every indicator is total — arbitrary input never panics
//! 4. Confidence stays in [0, 1] for arbitrary snapshots and contexts
//! 5. Ledger total PnL equals the sum of per-position realized PnL

use chrono::{DateTime, Duration};
use proptest::prelude::*;
use sniper_core::domain::Bar;
use sniper_core::engine::{EngineConfig, EntrySignal, PositionLedger};
use sniper_core::domain::{Direction, ExitReason};
use sniper_core::indicators::{
    atr, bollinger, ema, macd, rsi, vwap, IndicatorConfig, IndicatorSnapshot,
};
use sniper_core::scoring::{score, MarketContext};

// ── Strategies ───────────────────────────────────────────────────────

fn arb_price() -> impl Strategy<Value = f64> {
    (1.0..200.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn arb_closes(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(arb_price(), 0..max_len)
}

fn arb_bars(max_len: usize) -> impl Strategy<Value = Vec<Bar>> {
    prop::collection::vec((arb_price(), 0.0..2.0_f64, 1u64..200_000), 0..max_len).prop_map(
        |rows| {
            let t0 = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
            rows.iter()
                .enumerate()
                .map(|(i, &(close, range, volume))| Bar {
                    timestamp: t0 + Duration::minutes(i as i64),
                    open: close,
                    high: close + range,
                    low: (close - range).max(0.01),
                    close,
                    volume,
                })
                .collect()
        },
    )
}

fn arb_context() -> impl Strategy<Value = MarketContext> {
    (
        0.0..200_000.0_f64,
        0.0..1_000_000.0_f64,
        0.0..1.0_f64,
        -3.0..3.0_f64,
        -50.0..150.0_f64,
        70.0..110.0_f64,
        -0.5..1.5_f64,
        -0.5..1.5_f64,
    )
        .prop_map(
            |(volume, oi, iv, contango, inventory, dxy, geo, sentiment)| MarketContext {
                volume,
                open_interest: oi,
                implied_volatility: iv,
                contango,
                inventory_level: inventory,
                dollar_index: dxy,
                geopolitical_risk: geo,
                sentiment,
            },
        )
}

// ── 1. RSI bounds ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn rsi_stays_in_range(closes in arb_closes(100), period in 1usize..30) {
        let value = rsi(&closes, period);
        prop_assert!((0.0..=100.0).contains(&value), "rsi out of range: {value}");
        if closes.len() < period + 1 {
            prop_assert_eq!(value, 50.0);
        }
    }

    #[test]
    fn rsi_is_monotone_in_the_final_close(
        closes in prop::collection::vec(arb_price(), 15..40),
        bump in 0.01..10.0_f64,
    ) {
        let base = rsi(&closes, 14);
        let mut bumped = closes.clone();
        if let Some(last) = bumped.last_mut() {
            *last += bump;
        }
        let higher = rsi(&bumped, 14);
        prop_assert!(
            higher >= base - 1e-9,
            "raising the last close lowered RSI: {base} -> {higher}"
        );
    }

    // ── 2. Bollinger ordering ────────────────────────────────────────

    #[test]
    fn bollinger_bands_stay_ordered(closes in arb_closes(60), period in 2usize..30) {
        let bands = bollinger(&closes, period, 2.0);
        prop_assert!(bands.lower <= bands.middle + 1e-9);
        prop_assert!(bands.middle <= bands.upper + 1e-9);
    }

    // ── 3. Totality ──────────────────────────────────────────────────

    #[test]
    fn indicators_never_panic(closes in arb_closes(80), bars in arb_bars(80)) {
        let _ = ema(&closes, 9);
        let _ = ema(&closes, 21);
        let _ = rsi(&closes, 14);
        let _ = macd(&closes, 12, 26, 9);
        let _ = bollinger(&closes, 20, 2.0);
        let _ = atr(&bars, 14);
        let _ = vwap(&bars, 20);
        let _ = IndicatorSnapshot::compute(&bars, &IndicatorConfig::default());
    }

    #[test]
    fn ema_of_constant_series_is_the_constant(value in arb_price(), len in 21usize..60) {
        let closes = vec![value; len];
        let e = ema(&closes, 21);
        prop_assert!((e - value).abs() < 1e-9, "ema {e} != {value}");
    }

    // ── 4. Confidence bounds ─────────────────────────────────────────

    #[test]
    fn confidence_stays_in_unit_interval(
        bars in arb_bars(60),
        context in arb_context(),
        price in arb_price(),
    ) {
        let snapshot = IndicatorSnapshot::compute(&bars, &IndicatorConfig::default());
        let report = score(&snapshot, &context, price, 0.6, 0.4);
        prop_assert!((0.0..=1.0).contains(&report.confidence));
        prop_assert!((0.0..=1.0).contains(&report.external_signal));
        for factor in [
            report.factors.technical,
            report.factors.fundamental,
            report.factors.sentiment,
            report.factors.correlation,
            report.factors.volatility,
        ] {
            prop_assert!((0.0..=1.0).contains(&factor), "factor out of range: {factor}");
        }
    }

    // ── 5. Ledger accounting ─────────────────────────────────────────

    #[test]
    fn total_pnl_equals_sum_of_closed_positions(
        trades in prop::collection::vec(
            (arb_price(), arb_price(), 1u32..10, prop::bool::ANY),
            1..20,
        ),
    ) {
        let config = EngineConfig::default();
        let mut ledger = PositionLedger::new(config.contract.contract_size);
        let t0 = DateTime::from_timestamp(1_700_000_000, 0).unwrap();

        for (i, &(entry, exit, size, long)) in trades.iter().enumerate() {
            let signal = EntrySignal {
                symbol: "/CL".into(),
                direction: if long { Direction::Long } else { Direction::Short },
                price: entry,
                size,
                stop_loss: if long { entry - 1.0 } else { entry + 1.0 },
                take_profit: if long { entry + 3.0 } else { entry - 3.0 },
                confidence: 0.8,
                pattern: "EXTERNAL_SIGNAL".into(),
                timestamp: t0 + Duration::minutes(i as i64),
            };
            let position = ledger.open(&signal);
            ledger.close(
                position.id,
                exit,
                t0 + Duration::minutes(i as i64 + 1),
                ExitReason::LowConfidence,
            );
        }

        let summed: f64 = ledger
            .closed_positions()
            .iter()
            .map(|p| p.realized_pnl)
            .sum();
        prop_assert!(
            (ledger.metrics().total_pnl - summed).abs() < 1e-6,
            "metrics {} != sum {}",
            ledger.metrics().total_pnl,
            summed
        );
        prop_assert_eq!(ledger.metrics().total_trades as usize, trades.len());
    }
}
