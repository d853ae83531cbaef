//! Engine events and the subscriber bus.
//!
//! Subscribers receive events over unbounded `mpsc` channels: publishing
//! never blocks the analysis cycle, and a subscriber that hangs or drops its
//! receiver is silently pruned from the bus. Multiple independent subscribers
//! can coexist; each gets every event.

use crate::domain::{PerformanceMetrics, Position};
use crate::engine::sniper::{EntrySignal, SniperMode};
use crate::indicators::IndicatorSnapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{channel, Receiver, Sender};

/// Everything the engine tells the outside world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EngineEvent {
    /// The engine went active.
    Initialized { symbol: String },
    /// One analysis cycle completed.
    MarketUpdate {
        symbol: String,
        price: f64,
        confidence: f64,
        external_signal: f64,
        mode: SniperMode,
        indicators: IndicatorSnapshot,
    },
    /// An entry fired.
    TradingSignal(EntrySignal),
    /// A position closed; metrics are post-close.
    PositionClosed {
        position: Position,
        metrics: PerformanceMetrics,
    },
    /// Emergency stop ran to completion.
    EmergencyStop {
        timestamp: DateTime<Utc>,
        total_pnl: f64,
        closed_positions: usize,
    },
}

/// Fan-out event bus. Owned by the engine; not shared.
#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Vec<Sender<EngineEvent>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    /// Register a new subscriber and hand back its receiving end.
    pub fn subscribe(&mut self) -> Receiver<EngineEvent> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    /// Deliver an event to every live subscriber, pruning dead ones.
    pub fn publish(&mut self, event: EngineEvent) {
        self.subscribers
            .retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_subscribers_receive_events() {
        let mut bus = EventBus::new();
        let rx1 = bus.subscribe();
        let rx2 = bus.subscribe();

        bus.publish(EngineEvent::Initialized { symbol: "/CL".into() });

        for rx in [&rx1, &rx2] {
            match rx.try_recv().unwrap() {
                EngineEvent::Initialized { symbol } => assert_eq!(symbol, "/CL"),
                other => panic!("unexpected event: {other:?}"),
            }
        }
    }

    #[test]
    fn dropped_subscriber_is_pruned() {
        let mut bus = EventBus::new();
        let rx = bus.subscribe();
        drop(rx);
        bus.publish(EngineEvent::Initialized { symbol: "/CL".into() });
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn publish_without_subscribers_is_a_noop() {
        let mut bus = EventBus::new();
        bus.publish(EngineEvent::Initialized { symbol: "/CL".into() });
    }
}
