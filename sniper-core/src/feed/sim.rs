//! Deterministic simulated /CL feed.
//!
//! A seeded random walk around the crude-oil price level. The same seed always
//! produces the same bar and context sequence, independent of wall-clock time,
//! which is what the determinism tests and the benchmark rely on.

use crate::domain::Bar;
use crate::scoring::MarketContext;
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded random-walk generator of `(Bar, MarketContext)` pairs.
#[derive(Debug, Clone)]
pub struct SimulatedFeed {
    rng: StdRng,
    last_close: f64,
    next_timestamp: DateTime<Utc>,
}

impl SimulatedFeed {
    /// Default starting price for /CL.
    pub const BASE_PRICE: f64 = 75.0;

    pub fn new(seed: u64) -> Self {
        Self::with_base_price(seed, Self::BASE_PRICE)
    }

    pub fn with_base_price(seed: u64, base_price: f64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            last_close: base_price,
            // Fixed epoch keeps generated timestamps reproducible.
            next_timestamp: DateTime::from_timestamp(1_700_000_000, 0)
                .unwrap_or_else(Utc::now),
        }
    }

    /// Produce the next one-minute bar and its market context.
    pub fn next_bar(&mut self) -> (Bar, MarketContext) {
        let open = self.last_close;
        // ±$0.25 per bar.
        let change = (self.rng.gen::<f64>() - 0.5) * 0.5;
        let close = (open + change).max(0.01);
        let high = open.max(close) + self.rng.gen::<f64>() * 0.10;
        let low = (open.min(close) - self.rng.gen::<f64>() * 0.10).max(0.01);
        let volume = self.rng.gen_range(50_000..150_000);

        let bar = Bar {
            timestamp: self.next_timestamp,
            open,
            high,
            low,
            close,
            volume,
        };

        let context = MarketContext {
            volume: volume as f64,
            open_interest: self.rng.gen_range(100_000.0..600_000.0),
            implied_volatility: 0.25 + (self.rng.gen::<f64>() - 0.5) * 0.1,
            contango: (self.rng.gen::<f64>() - 0.5) * 2.0,
            inventory_level: self.rng.gen::<f64>() * 100.0,
            dollar_index: 90.0 + (self.rng.gen::<f64>() - 0.5) * 5.0,
            geopolitical_risk: self.rng.gen::<f64>() * 0.5,
            sentiment: self.rng.gen::<f64>(),
        };

        self.last_close = close;
        self.next_timestamp += Duration::minutes(1);
        (bar, context)
    }

    /// Convenience: generate `count` pairs in order.
    pub fn take(&mut self, count: usize) -> Vec<(Bar, MarketContext)> {
        (0..count).map(|_| self.next_bar()).collect()
    }
}
