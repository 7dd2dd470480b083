//! Contract identifier value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Symbol;
use crate::domain::shared::DomainError;

/// Identifier of one specific option contract as the ledger spells it.
///
/// Examples: "CLSK Jul 25 '25 $9 Call", "CLSK Sep 19 '25 $7 Call".
///
/// Two ids are the same contract only if their text matches after
/// whitespace normalization; distinct contracts are never netted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContractId(String);

impl ContractId {
    /// Create a contract id, collapsing runs of whitespace.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidValue` if the id is blank.
    pub fn new(value: impl AsRef<str>) -> Result<Self, DomainError> {
        let normalized = value
            .as_ref()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        if normalized.is_empty() {
            return Err(DomainError::InvalidValue {
                field: "contract_id".to_string(),
                message: "Contract id cannot be blank".to_string(),
            });
        }

        Ok(Self(normalized))
    }

    /// Get the id string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The underlying ticker: the first token of the id.
    #[must_use]
    pub fn underlying(&self) -> Symbol {
        Symbol::new(self.0.split(' ').next().unwrap_or_default())
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ContractId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ContractId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ContractId {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ContractId> for String {
    fn from(value: ContractId) -> Self {
        value.0
    }
}
