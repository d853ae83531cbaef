//! The sniper engine — one instrument, one instance, one analysis cycle per bar.
//!
//! A cycle runs synchronously to completion: append bar → recompute the
//! indicator snapshot → score → mode transition → entry/exit decisions →
//! ledger update → event emission. No locking is needed: every piece of
//! mutable state (history, snapshot, sniper state, ledger) is private to the
//! engine, and concurrent instruments each get their own engine value.

use crate::domain::{Bar, BarHistory, ExitReason, PerformanceMetrics, Position, Symbol};
use crate::engine::config::{ConfigError, ConfigUpdate, EngineConfig};
use crate::engine::events::{EngineEvent, EventBus};
use crate::engine::ledger::PositionLedger;
use crate::engine::sniper::{build_entry_signal, SniperMode, SniperState};
use crate::indicators::IndicatorSnapshot;
use crate::scoring::{self, MarketContext};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::mpsc::Receiver;
use tracing::{debug, info, warn};

/// Read-only snapshot of the engine for the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub symbol: Symbol,
    pub active: bool,
    pub mode: SniperMode,
    pub confidence: f64,
    pub external_signal: f64,
    /// Last close, 0.0 before the first bar.
    pub price: f64,
    pub indicators: IndicatorSnapshot,
    pub open_positions: Vec<Position>,
    pub metrics: PerformanceMetrics,
    pub config: EngineConfig,
}

/// Closed and open positions plus aggregate metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradingHistory {
    pub symbol: Symbol,
    pub total_trades: u64,
    pub open_positions: Vec<Position>,
    pub closed_positions: Vec<Position>,
    pub metrics: PerformanceMetrics,
}

/// The trading-signal engine. One per instrument; owns all of its state.
pub struct SniperEngine {
    symbol: Symbol,
    config: EngineConfig,
    history: BarHistory,
    snapshot: IndicatorSnapshot,
    context: MarketContext,
    state: SniperState,
    ledger: PositionLedger,
    events: EventBus,
    active: bool,
}

impl SniperEngine {
    /// Build an inactive engine. Call [`start`](Self::start) after wiring up
    /// subscribers so nobody misses the `Initialized` event.
    pub fn new(symbol: impl Into<Symbol>, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let contract_size = config.contract.contract_size;
        let bar_capacity = config.bar_capacity;
        Ok(Self {
            symbol: symbol.into(),
            config,
            history: BarHistory::new(bar_capacity),
            snapshot: IndicatorSnapshot::neutral(),
            context: MarketContext::neutral(),
            state: SniperState::new(),
            ledger: PositionLedger::new(contract_size),
            events: EventBus::new(),
            active: false,
        })
    }

    /// Register an event subscriber.
    pub fn subscribe(&mut self) -> Receiver<EngineEvent> {
        self.events.subscribe()
    }

    /// Activate the engine and announce it.
    pub fn start(&mut self) {
        if self.active {
            return;
        }
        self.active = true;
        if self.state.mode == SniperMode::Stopped {
            self.state.mode = SniperMode::Scanning;
        }
        info!(symbol = %self.symbol, "engine started");
        self.events.publish(EngineEvent::Initialized {
            symbol: self.symbol.clone(),
        });
    }

    /// Re-arm after an emergency stop. Alias for [`start`](Self::start).
    pub fn reactivate(&mut self) {
        self.start();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Replace the auxiliary market inputs used from the next cycle on.
    pub fn update_context(&mut self, context: MarketContext) {
        self.context = context;
    }

    /// Feed one bar and run one full analysis cycle.
    ///
    /// The bar is always recorded and the indicator snapshot recomputed, even
    /// while stopped, so a reactivated engine resumes with warm indicators.
    /// Scoring, transitions, and trading only happen while active.
    pub fn on_bar(&mut self, bar: Bar) {
        let timestamp = bar.timestamp;
        self.history.push(bar);
        self.snapshot = IndicatorSnapshot::compute(self.history.bars(), &self.config.indicators);

        if !self.active {
            return;
        }

        let price = self
            .history
            .latest()
            .map(|b| b.close)
            .unwrap_or(0.0);

        let report = scoring::score(
            &self.snapshot,
            &self.context,
            price,
            self.config.technical_weight,
            self.config.external_weight,
        );
        self.state.confidence = report.confidence;
        self.state.external_signal = report.external_signal;
        self.state.mode = SniperMode::for_confidence(report.confidence);
        debug!(
            symbol = %self.symbol,
            price,
            confidence = report.confidence,
            mode = %self.state.mode,
            "analysis cycle"
        );

        if !self.ledger.has_open()
            && report.confidence > self.config.entry_threshold
            && self.entries_allowed()
        {
            self.try_enter(price, report.external_signal, report.confidence, timestamp);
        }

        if self.ledger.has_open() {
            self.check_exits(price, timestamp);
        }

        self.events.publish(EngineEvent::MarketUpdate {
            symbol: self.symbol.clone(),
            price,
            confidence: self.state.confidence,
            external_signal: self.state.external_signal,
            mode: self.state.mode,
            indicators: self.snapshot.clone(),
        });
    }

    /// Entry gate: suppressed once the daily loss limit is breached.
    fn entries_allowed(&self) -> bool {
        let gate_open = self.ledger.metrics().total_pnl > -self.config.max_daily_loss;
        if !gate_open {
            warn!(
                symbol = %self.symbol,
                total_pnl = self.ledger.metrics().total_pnl,
                limit = self.config.max_daily_loss,
                "daily loss limit reached, entries suppressed"
            );
        }
        gate_open
    }

    fn try_enter(
        &mut self,
        price: f64,
        external_signal: f64,
        confidence: f64,
        timestamp: DateTime<Utc>,
    ) {
        let tags = scoring::detect(&self.snapshot, price);
        let pattern = scoring::entry_label(&tags);

        let Some(signal) = build_entry_signal(
            &self.symbol,
            price,
            self.snapshot.atr,
            external_signal,
            confidence,
            pattern,
            timestamp,
            &self.config,
        ) else {
            return;
        };

        self.state.arm(&signal);
        self.ledger.open(&signal);
        self.events.publish(EngineEvent::TradingSignal(signal));
    }

    /// Exit checks per open position, first match wins:
    /// stop-loss, then take-profit, then low confidence.
    fn check_exits(&mut self, price: f64, timestamp: DateTime<Utc>) {
        let open: Vec<Position> = self.ledger.open_positions().to_vec();
        for position in open {
            let sign = position.direction.sign();
            let reason = if sign * (price - position.stop_loss) <= 0.0 {
                ExitReason::StopLoss
            } else if sign * (price - position.take_profit) >= 0.0 {
                ExitReason::TakeProfit
            } else if self.state.confidence < self.config.exit_threshold {
                ExitReason::LowConfidence
            } else {
                continue;
            };

            if let Some(closed) = self.ledger.close(position.id, price, timestamp, reason) {
                if !self.ledger.has_open() {
                    self.state.disarm();
                }
                self.events.publish(EngineEvent::PositionClosed {
                    position: closed,
                    metrics: self.ledger.metrics().clone(),
                });
            }
        }
    }

    /// Validated, all-or-nothing configuration replacement. A rejected update
    /// leaves the running configuration untouched.
    pub fn update_config(&mut self, update: &ConfigUpdate) -> Result<(), ConfigError> {
        let next = self.config.with_update(update)?;
        if next.bar_capacity != self.config.bar_capacity {
            // Capacity changes apply to future eviction; existing tail is kept.
            let mut rebuilt = BarHistory::new(next.bar_capacity);
            for bar in self.history.bars().iter().cloned() {
                rebuilt.push(bar);
            }
            self.history = rebuilt;
        }
        self.ledger.set_contract_size(next.contract.contract_size);
        info!(symbol = %self.symbol, "configuration updated");
        self.config = next;
        Ok(())
    }

    /// Force-close everything at the last known price and halt.
    ///
    /// Safe to call at any time, idempotent: a second call finds no open
    /// positions and the same terminal state.
    pub fn emergency_stop(&mut self) {
        let (price, timestamp) = match self.history.latest() {
            Some(bar) => (bar.close, bar.timestamp),
            None => (0.0, Utc::now()),
        };

        let closed = self
            .ledger
            .close_all(price, timestamp, ExitReason::EmergencyStop);
        for position in &closed {
            self.events.publish(EngineEvent::PositionClosed {
                position: position.clone(),
                metrics: self.ledger.metrics().clone(),
            });
        }

        self.active = false;
        self.state.mode = SniperMode::Stopped;
        self.state.entry_pattern = None;
        warn!(
            symbol = %self.symbol,
            closed = closed.len(),
            total_pnl = self.ledger.metrics().total_pnl,
            "emergency stop"
        );
        self.events.publish(EngineEvent::EmergencyStop {
            timestamp,
            total_pnl: self.ledger.metrics().total_pnl,
            closed_positions: closed.len(),
        });
    }

    /// Read-only snapshot for the presentation layer.
    pub fn status(&self) -> EngineStatus {
        EngineStatus {
            symbol: self.symbol.clone(),
            active: self.active,
            mode: self.state.mode,
            confidence: self.state.confidence,
            external_signal: self.state.external_signal,
            price: self.history.latest().map(|b| b.close).unwrap_or(0.0),
            indicators: self.snapshot.clone(),
            open_positions: self.ledger.open_positions().to_vec(),
            metrics: self.ledger.metrics().clone(),
            config: self.config.clone(),
        }
    }

    /// Full trading history: open and closed positions plus metrics.
    pub fn history(&self) -> TradingHistory {
        TradingHistory {
            symbol: self.symbol.clone(),
            total_trades: self.ledger.metrics().total_trades,
            open_positions: self.ledger.open_positions().to_vec(),
            closed_positions: self.ledger.closed_positions().to_vec(),
            metrics: self.ledger.metrics().clone(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn sniper_state(&self) -> &SniperState {
        &self.state
    }

    pub fn bars_seen(&self) -> usize {
        self.history.len()
    }
}
