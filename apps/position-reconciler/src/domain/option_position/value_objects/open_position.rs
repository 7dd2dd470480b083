//! Open Position Value Object

use serde::{Deserialize, Serialize};

use super::OptionContract;
use crate::domain::shared::{ContractId, Symbol};

/// A contract with a nonzero net quantity outstanding.
///
/// Negative quantities are short (written) contracts, positive are long.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenPosition {
    /// Contract id.
    contract_id: ContractId,
    /// Signed net contract count.
    net_quantity: i64,
}

impl OpenPosition {
    /// Create an open position.
    #[must_use]
    pub const fn new(contract_id: ContractId, net_quantity: i64) -> Self {
        Self {
            contract_id,
            net_quantity,
        }
    }

    /// Get the contract id.
    #[must_use]
    pub const fn contract_id(&self) -> &ContractId {
        &self.contract_id
    }

    /// Get the signed net quantity.
    #[must_use]
    pub const fn net_quantity(&self) -> i64 {
        self.net_quantity
    }

    /// Check if the position is short.
    #[must_use]
    pub const fn is_short(&self) -> bool {
        self.net_quantity < 0
    }

    /// Underlying ticker.
    #[must_use]
    pub fn underlying(&self) -> Symbol {
        self.contract_id.underlying()
    }

    /// Parsed contract terms, when the id follows the ledger layout.
    #[must_use]
    pub fn contract(&self) -> Option<OptionContract> {
        OptionContract::parse(&self.contract_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn position(net: i64) -> OpenPosition {
        OpenPosition::new(ContractId::new("CLSK Jul 25 '25 $8.50 Call").unwrap(), net)
    }

    #[test]
    fn short_and_long_positions() {
        assert!(position(-1).is_short());
        assert!(!position(3).is_short());
        assert_eq!(position(3).net_quantity(), 3);
    }

    #[test]
    fn underlying_and_contract() {
        let p = position(-1);
        assert_eq!(p.underlying().as_str(), "CLSK");
        assert_eq!(p.contract().unwrap().strike(), Decimal::new(850, 2));
    }

    #[test]
    fn open_position_serde() {
        let p = position(-1);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(
            json,
            r#"{"contract_id":"CLSK Jul 25 '25 $8.50 Call","net_quantity":-1}"#
        );
    }
}
