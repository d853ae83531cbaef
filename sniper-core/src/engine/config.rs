//! Engine configuration — immutable once applied, replaced wholesale.
//!
//! `EngineConfig` is validated at construction and on every update; a
//! rejected update leaves the previous configuration untouched, so an
//! in-flight analysis cycle never sees a partially-applied config.

use crate::domain::ContractSpec;
use crate::indicators::IndicatorConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a configuration (or an update to it) was rejected.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("indicator period {name} must be >= 1")]
    ZeroPeriod { name: &'static str },

    #[error("macd fast period ({fast}) must be less than slow period ({slow})")]
    MacdPeriodOrder { fast: usize, slow: usize },

    #[error("{name} must be in [0, 1], got {value}")]
    ThresholdOutOfRange { name: &'static str, value: f64 },

    #[error("entry threshold ({entry}) must exceed exit threshold ({exit})")]
    ThresholdOrder { entry: f64, exit: f64 },

    #[error("technical and external weights must sum to 1, got {sum}")]
    WeightsDoNotSumToOne { sum: f64 },

    #[error("risk_per_trade must be in (0, 1), got {0}")]
    RiskOutOfRange(f64),

    #[error("max_position_size must be >= 1")]
    ZeroMaxPosition,

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("bar_capacity must be >= 1")]
    ZeroBarCapacity,
}

/// Complete engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    pub contract: ContractSpec,
    /// Account balance used for risk sizing.
    pub account_balance: f64,
    /// Hard cap on position size, in contracts.
    pub max_position_size: u32,
    /// Entries are suppressed once total PnL reaches this loss.
    pub max_daily_loss: f64,
    /// Fraction of the account risked per trade.
    pub risk_per_trade: f64,
    pub indicators: IndicatorConfig,
    /// Confidence required to fire an entry signal.
    pub entry_threshold: f64,
    /// Open positions are cut when confidence falls below this.
    pub exit_threshold: f64,
    pub technical_weight: f64,
    pub external_weight: f64,
    /// Bounded bar history capacity.
    pub bar_capacity: usize,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ind = &self.indicators;
        for (name, period) in [
            ("ema_short", ind.ema_short),
            ("ema_long", ind.ema_long),
            ("rsi_period", ind.rsi_period),
            ("macd_fast", ind.macd_fast),
            ("macd_slow", ind.macd_slow),
            ("macd_signal", ind.macd_signal),
            ("bollinger_period", ind.bollinger_period),
            ("vwap_window", ind.vwap_window),
            ("atr_period", ind.atr_period),
        ] {
            if period == 0 {
                return Err(ConfigError::ZeroPeriod { name });
            }
        }
        if ind.macd_fast >= ind.macd_slow {
            return Err(ConfigError::MacdPeriodOrder {
                fast: ind.macd_fast,
                slow: ind.macd_slow,
            });
        }

        for (name, value) in [
            ("entry_threshold", self.entry_threshold),
            ("exit_threshold", self.exit_threshold),
            ("technical_weight", self.technical_weight),
            ("external_weight", self.external_weight),
        ] {
            if !(0.0..=1.0).contains(&value) || value.is_nan() {
                return Err(ConfigError::ThresholdOutOfRange { name, value });
            }
        }
        if self.entry_threshold <= self.exit_threshold {
            return Err(ConfigError::ThresholdOrder {
                entry: self.entry_threshold,
                exit: self.exit_threshold,
            });
        }

        let weight_sum = self.technical_weight + self.external_weight;
        if (weight_sum - 1.0).abs() > 1e-9 {
            return Err(ConfigError::WeightsDoNotSumToOne { sum: weight_sum });
        }

        if !(self.risk_per_trade > 0.0 && self.risk_per_trade < 1.0) {
            return Err(ConfigError::RiskOutOfRange(self.risk_per_trade));
        }
        if self.max_position_size == 0 {
            return Err(ConfigError::ZeroMaxPosition);
        }
        for (name, value) in [
            ("bollinger_multiplier", ind.bollinger_multiplier),
            ("account_balance", self.account_balance),
            ("max_daily_loss", self.max_daily_loss),
            ("contract_size", self.contract.contract_size),
            ("tick_size", self.contract.tick_size),
            ("tick_value", self.contract.tick_value),
            ("margin", self.contract.margin),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        if self.bar_capacity == 0 {
            return Err(ConfigError::ZeroBarCapacity);
        }

        Ok(())
    }

    /// Build the configuration that would result from applying `update`.
    ///
    /// Validates the merged result; on error the caller keeps the old config.
    pub fn with_update(&self, update: &ConfigUpdate) -> Result<EngineConfig, ConfigError> {
        let mut next = self.clone();

        if let Some(contract) = &update.contract {
            next.contract = contract.clone();
        }
        if let Some(v) = update.account_balance {
            next.account_balance = v;
        }
        if let Some(v) = update.max_position_size {
            next.max_position_size = v;
        }
        if let Some(v) = update.max_daily_loss {
            next.max_daily_loss = v;
        }
        if let Some(v) = update.risk_per_trade {
            next.risk_per_trade = v;
        }
        if let Some(v) = update.ema_short {
            next.indicators.ema_short = v;
        }
        if let Some(v) = update.ema_long {
            next.indicators.ema_long = v;
        }
        if let Some(v) = update.rsi_period {
            next.indicators.rsi_period = v;
        }
        if let Some(v) = update.macd_fast {
            next.indicators.macd_fast = v;
        }
        if let Some(v) = update.macd_slow {
            next.indicators.macd_slow = v;
        }
        if let Some(v) = update.macd_signal {
            next.indicators.macd_signal = v;
        }
        if let Some(v) = update.bollinger_period {
            next.indicators.bollinger_period = v;
        }
        if let Some(v) = update.bollinger_multiplier {
            next.indicators.bollinger_multiplier = v;
        }
        if let Some(v) = update.vwap_window {
            next.indicators.vwap_window = v;
        }
        if let Some(v) = update.atr_period {
            next.indicators.atr_period = v;
        }
        if let Some(v) = update.entry_threshold {
            next.entry_threshold = v;
        }
        if let Some(v) = update.exit_threshold {
            next.exit_threshold = v;
        }
        if let Some(v) = update.technical_weight {
            next.technical_weight = v;
        }
        if let Some(v) = update.external_weight {
            next.external_weight = v;
        }
        if let Some(v) = update.bar_capacity {
            next.bar_capacity = v;
        }

        next.validate()?;
        Ok(next)
    }
}

impl Default for EngineConfig {
    /// /CL defaults: 2% risk, 10-contract cap, 0.75/0.25 thresholds, 0.6/0.4 weights.
    fn default() -> Self {
        Self {
            contract: ContractSpec::crude_oil(),
            account_balance: 100_000.0,
            max_position_size: 10,
            max_daily_loss: 10_000.0,
            risk_per_trade: 0.02,
            indicators: IndicatorConfig::default(),
            entry_threshold: 0.75,
            exit_threshold: 0.25,
            technical_weight: 0.6,
            external_weight: 0.4,
            bar_capacity: 1000,
        }
    }
}

/// Partial configuration delta. Every field optional; unset fields keep their
/// current value. Deserializable from TOML/JSON for the CLI config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigUpdate {
    pub contract: Option<ContractSpec>,
    pub account_balance: Option<f64>,
    pub max_position_size: Option<u32>,
    pub max_daily_loss: Option<f64>,
    pub risk_per_trade: Option<f64>,
    pub ema_short: Option<usize>,
    pub ema_long: Option<usize>,
    pub rsi_period: Option<usize>,
    pub macd_fast: Option<usize>,
    pub macd_slow: Option<usize>,
    pub macd_signal: Option<usize>,
    pub bollinger_period: Option<usize>,
    pub bollinger_multiplier: Option<f64>,
    pub vwap_window: Option<usize>,
    pub atr_period: Option<usize>,
    pub entry_threshold: Option<f64>,
    pub exit_threshold: Option<f64>,
    pub technical_weight: Option<f64>,
    pub external_weight: Option<f64>,
    pub bar_capacity: Option<usize>,
}
