//! Aggregate performance metrics, updated incrementally as positions close.

use serde::{Deserialize, Serialize};

/// Running performance statistics for one engine instance.
///
/// Counters are monotonic; ratios are recomputed on every close. Average win
/// and loss use the incremental mean formula, never a rescan of history, so
/// the cost per close is O(1).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerformanceMetrics {
    pub total_trades: u64,
    pub winning_trades: u64,
    pub losing_trades: u64,
    pub total_pnl: f64,
    pub win_rate: f64,
    pub average_win: f64,
    pub average_loss: f64,
    /// average_win / average_loss; holds its last value while average_loss is 0.
    pub profit_factor: f64,
    /// win_rate * avg_win - (1 - win_rate) * avg_loss.
    pub expectancy: f64,
    /// Deepest peak-to-trough fall of cumulative realized PnL, as a positive number.
    pub max_drawdown: f64,
    #[serde(skip)]
    equity_peak: f64,
}

impl PerformanceMetrics {
    pub fn new() -> Self {
        Self {
            total_trades: 0,
            winning_trades: 0,
            losing_trades: 0,
            total_pnl: 0.0,
            win_rate: 0.0,
            average_win: 0.0,
            average_loss: 0.0,
            profit_factor: 0.0,
            expectancy: 0.0,
            max_drawdown: 0.0,
            equity_peak: 0.0,
        }
    }

    /// A position was opened. Trades are counted at entry, so win_rate
    /// denominators include the still-open trade.
    pub fn record_open(&mut self) {
        self.total_trades += 1;
    }

    /// A position closed with the given realized PnL. Called exactly once per close.
    pub fn record_close(&mut self, pnl: f64) {
        self.total_pnl += pnl;

        if pnl > 0.0 {
            self.winning_trades += 1;
            let n = self.winning_trades as f64;
            self.average_win += (pnl - self.average_win) / n;
        } else {
            self.losing_trades += 1;
            let n = self.losing_trades as f64;
            self.average_loss += (pnl.abs() - self.average_loss) / n;
        }

        if self.total_trades > 0 {
            self.win_rate = self.winning_trades as f64 / self.total_trades as f64;
        }

        // Guard: profit factor is undefined until a loss has been booked.
        if self.average_loss > 0.0 {
            self.profit_factor = self.average_win / self.average_loss;
        }

        self.expectancy =
            self.win_rate * self.average_win - (1.0 - self.win_rate) * self.average_loss;

        // Realized-equity drawdown: track the running peak of cumulative PnL.
        if self.total_pnl > self.equity_peak {
            self.equity_peak = self.total_pnl;
        }
        let drawdown = self.equity_peak - self.total_pnl;
        if drawdown > self.max_drawdown {
            self.max_drawdown = drawdown;
        }
    }
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self::new()
    }
}
