//! Contract specification — the economics of the traded futures instrument.

use serde::{Deserialize, Serialize};

/// Futures contract economics.
///
/// `contract_size` is the deliverable quantity per contract (1000 barrels for
/// WTI crude), `tick_size` the minimum price increment in price units, and
/// `tick_value` the dollar value of one tick for one contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContractSpec {
    /// Deliverable units per contract (barrels for /CL).
    pub contract_size: f64,
    /// Minimum price increment, in price units.
    pub tick_size: f64,
    /// Dollar value of one tick for one contract.
    pub tick_value: f64,
    /// Initial margin per contract.
    pub margin: f64,
}

impl ContractSpec {
    /// WTI crude oil futures (/CL): 1000 bbl, $0.01 tick worth $10, $5000 margin.
    pub fn crude_oil() -> Self {
        Self {
            contract_size: 1000.0,
            tick_size: 0.01,
            tick_value: 10.0,
            margin: 5000.0,
        }
    }

    /// Dollar value of a one-point price move for one contract.
    pub fn point_value(&self) -> f64 {
        self.tick_value / self.tick_size
    }

    pub fn is_valid(&self) -> bool {
        self.contract_size > 0.0 && self.tick_size > 0.0 && self.tick_value > 0.0 && self.margin > 0.0
    }
}

impl Default for ContractSpec {
    fn default() -> Self {
        Self::crude_oil()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crude_oil_point_value() {
        // $10 per $0.01 tick → $1000 per full point.
        let spec = ContractSpec::crude_oil();
        assert_eq!(spec.point_value(), 1000.0);
        assert!(spec.is_valid());
    }

    #[test]
    fn zero_tick_size_is_invalid() {
        let spec = ContractSpec {
            tick_size: 0.0,
            ..ContractSpec::crude_oil()
        };
        assert!(!spec.is_valid());
    }
}
