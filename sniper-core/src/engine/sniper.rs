//! Sniper state machine — operating mode, armed levels, and entry-signal
//! construction with ATR-based risk sizing.

use crate::domain::{ContractSpec, Direction};
use crate::engine::config::EngineConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operating mode. Scanning/Stalking/Targeting are re-derived from confidence
/// every cycle; Executing is set at entry and holds until the next cycle;
/// Stopped is terminal until the engine is explicitly reactivated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SniperMode {
    Scanning,
    Stalking,
    Targeting,
    Executing,
    Stopped,
}

impl SniperMode {
    /// Threshold table: > 0.8 Targeting, > 0.6 Stalking, else Scanning.
    pub fn for_confidence(confidence: f64) -> Self {
        if confidence > 0.8 {
            SniperMode::Targeting
        } else if confidence > 0.6 {
            SniperMode::Stalking
        } else {
            SniperMode::Scanning
        }
    }
}

impl fmt::Display for SniperMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SniperMode::Scanning => "SCANNING",
            SniperMode::Stalking => "STALKING",
            SniperMode::Targeting => "TARGETING",
            SniperMode::Executing => "EXECUTING",
            SniperMode::Stopped => "STOPPED",
        };
        write!(f, "{label}")
    }
}

/// Session state for one instrument. Mutated only by the state machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SniperState {
    pub mode: SniperMode,
    pub target_price: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub confidence: f64,
    pub external_signal: f64,
    pub entry_pattern: Option<String>,
}

impl SniperState {
    pub fn new() -> Self {
        Self {
            mode: SniperMode::Scanning,
            target_price: 0.0,
            stop_loss: 0.0,
            take_profit: 0.0,
            confidence: 0.0,
            external_signal: 0.0,
            entry_pattern: None,
        }
    }

    /// Record an armed entry: levels, pattern, Executing mode.
    pub fn arm(&mut self, signal: &EntrySignal) {
        self.target_price = signal.price;
        self.stop_loss = signal.stop_loss;
        self.take_profit = signal.take_profit;
        self.entry_pattern = Some(signal.pattern.clone());
        self.mode = SniperMode::Executing;
    }

    /// The flat-side reset after the last open position closes.
    pub fn disarm(&mut self) {
        self.entry_pattern = None;
        if self.mode != SniperMode::Stopped {
            self.mode = SniperMode::Scanning;
        }
    }
}

impl Default for SniperState {
    fn default() -> Self {
        Self::new()
    }
}

/// A fully-specified entry instruction for the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntrySignal {
    pub symbol: String,
    pub direction: Direction,
    pub price: f64,
    /// Contracts.
    pub size: u32,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub confidence: f64,
    pub pattern: String,
    pub timestamp: DateTime<Utc>,
}

/// Risk-sized entry construction.
///
/// Stop distance is 2×ATR; take profit sits at 3× the stop distance (3:1
/// reward:risk). Per-contract risk is unit-consistent:
/// `(stop_distance / tick_size) × tick_value` dollars. Returns None when ATR
/// is degenerate or the risk budget sizes to zero contracts.
#[allow(clippy::too_many_arguments)]
pub fn build_entry_signal(
    symbol: &str,
    price: f64,
    atr: f64,
    external_signal: f64,
    confidence: f64,
    pattern: String,
    timestamp: DateTime<Utc>,
    config: &EngineConfig,
) -> Option<EntrySignal> {
    if atr <= 0.0 || price <= 0.0 {
        return None;
    }

    let stop_distance = 2.0 * atr;
    let size = risk_size(
        config.account_balance * config.risk_per_trade,
        stop_distance,
        &config.contract,
        config.max_position_size,
    );
    if size == 0 {
        return None;
    }

    let direction = if external_signal > 0.5 {
        Direction::Long
    } else {
        Direction::Short
    };

    let (stop_loss, take_profit) = match direction {
        Direction::Long => (price - stop_distance, price + stop_distance * 3.0),
        Direction::Short => (price + stop_distance, price - stop_distance * 3.0),
    };

    Some(EntrySignal {
        symbol: symbol.to_string(),
        direction,
        price,
        size,
        stop_loss,
        take_profit,
        confidence,
        pattern,
        timestamp,
    })
}

/// Contracts for a given dollar risk budget and stop distance, capped.
pub fn risk_size(
    risk_dollars: f64,
    stop_distance: f64,
    contract: &ContractSpec,
    max_size: u32,
) -> u32 {
    if stop_distance <= 0.0 || risk_dollars <= 0.0 {
        return 0;
    }
    let per_contract_risk = (stop_distance / contract.tick_size) * contract.tick_value;
    if per_contract_risk <= 0.0 {
        return 0;
    }
    let size = (risk_dollars / per_contract_risk).floor() as u32;
    size.min(max_size)
}
