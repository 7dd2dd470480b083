//! Option Contract Value Object

use std::str::FromStr;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::{ContractId, Symbol};

/// Option right (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptionRight {
    /// Call option (right to buy).
    Call,
    /// Put option (right to sell).
    Put,
}

impl std::fmt::Display for OptionRight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "CALL"),
            Self::Put => write!(f, "PUT"),
        }
    }
}

/// Option contract terms parsed from a ledger contract id.
///
/// Ledger ids read like `"CLSK Jul 25 '25 $9 Call"`:
/// underlying, expiration month/day/two-digit year, strike, right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionContract {
    /// Underlying symbol.
    underlying: Symbol,
    /// Expiration date.
    expiration: NaiveDate,
    /// Strike price.
    strike: Decimal,
    /// Call or put.
    right: OptionRight,
}

impl OptionContract {
    /// Create a new option contract.
    #[must_use]
    pub const fn new(
        underlying: Symbol,
        expiration: NaiveDate,
        strike: Decimal,
        right: OptionRight,
    ) -> Self {
        Self {
            underlying,
            expiration,
            strike,
            right,
        }
    }

    /// Parse the terms out of a ledger contract id.
    ///
    /// Returns `None` when the id does not follow the ledger layout;
    /// reconciliation never depends on this succeeding.
    #[must_use]
    pub fn parse(contract_id: &ContractId) -> Option<Self> {
        let caps = contract_pattern().captures(contract_id.as_str())?;

        let day = caps.get(3)?.as_str();
        let month = caps.get(2)?.as_str();
        let year = caps.get(4)?.as_str();
        let expiration =
            NaiveDate::parse_from_str(&format!("{day} {month} 20{year}"), "%d %b %Y").ok()?;

        let strike = Decimal::from_str(caps.get(5)?.as_str()).ok()?;
        let right = if caps.get(6)?.as_str().eq_ignore_ascii_case("call") {
            OptionRight::Call
        } else {
            OptionRight::Put
        };

        Some(Self::new(
            Symbol::new(caps.get(1)?.as_str()),
            expiration,
            strike,
            right,
        ))
    }

    /// Get the underlying symbol.
    #[must_use]
    pub const fn underlying(&self) -> &Symbol {
        &self.underlying
    }

    /// Get the expiration date.
    #[must_use]
    pub const fn expiration(&self) -> NaiveDate {
        self.expiration
    }

    /// Get the strike price.
    #[must_use]
    pub const fn strike(&self) -> Decimal {
        self.strike
    }

    /// Get the option right.
    #[must_use]
    pub const fn right(&self) -> OptionRight {
        self.right
    }

    /// Check if the option has expired.
    #[must_use]
    pub fn is_expired(&self, as_of: NaiveDate) -> bool {
        self.expiration < as_of
    }
}

#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn contract_pattern() -> &'static Regex {
    static CONTRACT_REGEX: OnceLock<Regex> = OnceLock::new();

    CONTRACT_REGEX.get_or_init(|| {
        Regex::new(
            r"(?i)^([A-Z0-9./]+) ([A-Z]{3}) (\d{1,2}) '(\d{2}) \$(\d+(?:\.\d+)?) (CALL|PUT)$",
        )
        .expect("contract id regex is valid")
    })
}
