//! Domain types for the sniper engine.

pub mod bar;
pub mod instrument;
pub mod metrics;
pub mod position;

pub use bar::{Bar, BarHistory};
pub use instrument::ContractSpec;
pub use metrics::PerformanceMetrics;
pub use position::{Direction, ExitReason, Position, PositionId, PositionStatus};

/// Symbol type alias.
pub type Symbol = String;
