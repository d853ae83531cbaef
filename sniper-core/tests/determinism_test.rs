//! Same seed, same config — byte-identical outcomes.
//!
//! The whole pipeline (simulated feed, indicators, scoring, entries, exits)
//! must be a pure function of the seed and the configuration.

use sniper_core::engine::{EngineConfig, SniperEngine};
use sniper_core::feed::SimulatedFeed;
use sniper_core::fingerprint::ConfigFingerprint;

fn run(seed: u64, bars: usize) -> SniperEngine {
    let mut engine = SniperEngine::new("/CL", EngineConfig::default()).unwrap();
    engine.start();
    let mut feed = SimulatedFeed::new(seed);
    for _ in 0..bars {
        let (bar, context) = feed.next_bar();
        engine.update_context(context);
        engine.on_bar(bar);
    }
    engine
}

#[test]
fn identical_runs_produce_identical_status_and_history() {
    let a = run(42, 500);
    let b = run(42, 500);

    let status_a = serde_json::to_string(&a.status()).unwrap();
    let status_b = serde_json::to_string(&b.status()).unwrap();
    assert_eq!(status_a, status_b);

    let history_a = serde_json::to_string(&a.history()).unwrap();
    let history_b = serde_json::to_string(&b.history()).unwrap();
    assert_eq!(history_a, history_b);
}

#[test]
fn different_seeds_produce_different_price_paths() {
    let a = run(1, 200);
    let b = run(2, 200);
    assert_ne!(a.status().price, b.status().price);
}

#[test]
fn fingerprint_is_stable_across_runs() {
    let a = run(42, 100);
    let b = run(42, 100);
    assert_eq!(
        ConfigFingerprint::of(a.config()),
        ConfigFingerprint::of(b.config())
    );
    assert_eq!(
        ConfigFingerprint::of(a.config()),
        ConfigFingerprint::of(&EngineConfig::default())
    );
}
