//! Market data feeds. Currently only the deterministic simulated feed; a live
//! feed plugs in by producing the same `(Bar, MarketContext)` pairs.

pub mod sim;

pub use sim::SimulatedFeed;
