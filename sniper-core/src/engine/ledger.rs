//! Position ledger — owns every position's lifecycle and the derived metrics.
//!
//! Guarantees:
//! - a position is Open xor Closed, never both;
//! - metrics update exactly once per close;
//! - total PnL is the exact sum of realized per-trade PnL.

use crate::domain::{
    Direction, ExitReason, PerformanceMetrics, Position, PositionId, PositionStatus,
};
use crate::engine::sniper::EntrySignal;
use chrono::{DateTime, Utc};
use tracing::info;

/// Open and closed positions for one instrument, plus aggregate metrics.
#[derive(Debug, Clone)]
pub struct PositionLedger {
    open: Vec<Position>,
    closed: Vec<Position>,
    metrics: PerformanceMetrics,
    /// Contract multiplier applied to price moves (1000 bbl for /CL).
    contract_size: f64,
    next_id: u64,
}

impl PositionLedger {
    pub fn new(contract_size: f64) -> Self {
        Self {
            open: Vec::new(),
            closed: Vec::new(),
            metrics: PerformanceMetrics::new(),
            contract_size,
            next_id: 1,
        }
    }

    /// Construct and book an open position from an entry signal.
    pub fn open(&mut self, signal: &EntrySignal) -> Position {
        let position = Position {
            id: PositionId(self.next_id),
            symbol: signal.symbol.clone(),
            direction: signal.direction,
            entry_price: signal.price,
            size: signal.size,
            stop_loss: signal.stop_loss,
            take_profit: signal.take_profit,
            entry_time: signal.timestamp,
            pattern: signal.pattern.clone(),
            status: PositionStatus::Open,
            exit_price: None,
            exit_time: None,
            exit_reason: None,
            realized_pnl: 0.0,
        };
        self.next_id += 1;
        self.metrics.record_open();
        info!(
            id = %position.id,
            direction = %position.direction,
            size = position.size,
            entry = position.entry_price,
            stop = position.stop_loss,
            target = position.take_profit,
            pattern = %position.pattern,
            "position opened"
        );
        self.open.push(position.clone());
        position
    }

    /// Close one open position at `exit_price`. Returns the closed record, or
    /// None if the id is unknown or already closed.
    pub fn close(
        &mut self,
        id: PositionId,
        exit_price: f64,
        exit_time: DateTime<Utc>,
        reason: ExitReason,
    ) -> Option<Position> {
        let index = self.open.iter().position(|p| p.id == id)?;
        let mut position = self.open.remove(index);

        let price_move = match position.direction {
            Direction::Long => exit_price - position.entry_price,
            Direction::Short => position.entry_price - exit_price,
        };
        let pnl = price_move * position.size as f64 * self.contract_size;

        position.status = PositionStatus::Closed;
        position.exit_price = Some(exit_price);
        position.exit_time = Some(exit_time);
        position.exit_reason = Some(reason);
        position.realized_pnl = pnl;

        self.metrics.record_close(pnl);
        info!(
            id = %position.id,
            direction = %position.direction,
            pnl,
            reason = %reason,
            win_rate = self.metrics.win_rate,
            total_pnl = self.metrics.total_pnl,
            "position closed"
        );

        self.closed.push(position.clone());
        Some(position)
    }

    /// Close every open position at one price — the emergency-stop path.
    /// Returns the closed records in entry order.
    pub fn close_all(
        &mut self,
        exit_price: f64,
        exit_time: DateTime<Utc>,
        reason: ExitReason,
    ) -> Vec<Position> {
        let ids: Vec<PositionId> = self.open.iter().map(|p| p.id).collect();
        ids.into_iter()
            .filter_map(|id| self.close(id, exit_price, exit_time, reason))
            .collect()
    }

    pub fn open_positions(&self) -> &[Position] {
        &self.open
    }

    pub fn closed_positions(&self) -> &[Position] {
        &self.closed
    }

    pub fn has_open(&self) -> bool {
        !self.open.is_empty()
    }

    pub fn metrics(&self) -> &PerformanceMetrics {
        &self.metrics
    }

    /// Applies to closes from now on; callers should only change this
    /// while flat.
    pub fn set_contract_size(&mut self, contract_size: f64) {
        self.contract_size = contract_size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Direction;
    use chrono::DateTime;

    fn ts() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn long_signal(price: f64, size: u32) -> EntrySignal {
        EntrySignal {
            symbol: "/CL".into(),
            direction: Direction::Long,
            price,
            size,
            stop_loss: price - 0.6,
            take_profit: price + 1.8,
            confidence: 0.8,
            pattern: "TEST".into(),
            timestamp: ts(),
        }
    }

    #[test]
    fn open_then_close_books_pnl() {
        let mut ledger = PositionLedger::new(1000.0);
        let pos = ledger.open(&long_signal(75.0, 3));
        assert!(ledger.has_open());

        let closed = ledger
            .close(pos.id, 76.0, ts(), ExitReason::TakeProfit)
            .unwrap();
        // (76 - 75) * 3 * 1000
        assert_eq!(closed.realized_pnl, 3000.0);
        assert_eq!(closed.status, PositionStatus::Closed);
        assert!(!ledger.has_open());
        assert_eq!(ledger.metrics().total_pnl, 3000.0);
        assert_eq!(ledger.metrics().total_trades, 1);
        assert_eq!(ledger.metrics().winning_trades, 1);
    }

    #[test]
    fn short_pnl_inverts() {
        let mut ledger = PositionLedger::new(1000.0);
        let mut signal = long_signal(75.0, 2);
        signal.direction = Direction::Short;
        let pos = ledger.open(&signal);
        let closed = ledger
            .close(pos.id, 74.0, ts(), ExitReason::TakeProfit)
            .unwrap();
        assert_eq!(closed.realized_pnl, 2000.0);
    }

    #[test]
    fn double_close_is_rejected() {
        let mut ledger = PositionLedger::new(1000.0);
        let pos = ledger.open(&long_signal(75.0, 1));
        assert!(ledger.close(pos.id, 75.5, ts(), ExitReason::TakeProfit).is_some());
        assert!(ledger.close(pos.id, 75.5, ts(), ExitReason::TakeProfit).is_none());
        assert_eq!(ledger.metrics().total_trades, 1);
        assert_eq!(ledger.metrics().total_pnl, 500.0);
    }

    #[test]
    fn close_all_sweeps_open_set() {
        let mut ledger = PositionLedger::new(1000.0);
        ledger.open(&long_signal(75.0, 1));
        ledger.open(&long_signal(75.5, 2));
        let closed = ledger.close_all(74.5, ts(), ExitReason::EmergencyStop);
        assert_eq!(closed.len(), 2);
        assert!(!ledger.has_open());
        assert!(closed
            .iter()
            .all(|p| p.exit_reason == Some(ExitReason::EmergencyStop)));
        // (74.5-75.0)*1*1000 + (74.5-75.5)*2*1000 = -500 - 2000
        assert_eq!(ledger.metrics().total_pnl, -2500.0);
    }

    #[test]
    fn total_pnl_is_exact_sum_of_trades() {
        let mut ledger = PositionLedger::new(1000.0);
        let exits = [75.3, 74.8, 76.1, 74.2];
        for &exit in &exits {
            let pos = ledger.open(&long_signal(75.0, 2));
            ledger.close(pos.id, exit, ts(), ExitReason::LowConfidence);
        }
        let sum: f64 = ledger
            .closed_positions()
            .iter()
            .map(|p| p.realized_pnl)
            .sum();
        assert!((ledger.metrics().total_pnl - sum).abs() < 1e-9);
    }
}
