//! Sniper Core — indicator math, confidence scoring, and the crude-oil
//! trading-signal engine.
//!
//! This crate contains the heart of the signal platform:
//! - Domain types (bars, contract specs, positions, performance metrics)
//! - Indicator library with neutral sentinels for insufficient data
//! - Multi-factor confidence scoring and pattern detection
//! - Sniper state machine with entry/exit rules and ATR-based sizing
//! - Position ledger with incremental performance metrics
//! - Event-driven engine running one synchronous analysis cycle per bar
//! - Deterministic simulated feed and configuration fingerprinting

pub mod domain;
pub mod engine;
pub mod feed;
pub mod fingerprint;
pub mod indicators;
pub mod scoring;
