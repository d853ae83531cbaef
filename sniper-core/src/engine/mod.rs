//! The trading engine — configuration, sniper state machine, position
//! ledger, event bus, and the per-bar analysis cycle that ties them together.

pub mod config;
pub mod event_loop;
pub mod events;
pub mod ledger;
pub mod sniper;

pub use config::{ConfigError, ConfigUpdate, EngineConfig};
pub use event_loop::{EngineStatus, SniperEngine, TradingHistory};
pub use events::{EngineEvent, EventBus};
pub use ledger::PositionLedger;
pub use sniper::{build_entry_signal, risk_size, EntrySignal, SniperMode, SniperState};
