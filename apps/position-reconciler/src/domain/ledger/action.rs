//! Transaction actions and the fixed mapping from ledger transaction types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A recognized option transaction action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionAction {
    /// Writes (opens) a short position.
    SoldShort,
    /// Closes a short position.
    BoughtToCover,
    /// Opens a long position.
    BoughtToOpen,
    /// Closes a long position.
    SoldToClose,
    /// Short option was exercised against the writer.
    Assigned,
    /// Contract expired worthless.
    Expired,
}

impl TransactionAction {
    /// Every recognized action.
    pub const ALL: [Self; 6] = [
        Self::SoldShort,
        Self::BoughtToCover,
        Self::BoughtToOpen,
        Self::SoldToClose,
        Self::Assigned,
        Self::Expired,
    ];

    /// Map a ledger `transaction_type` onto an action.
    ///
    /// Matching ignores case, surrounding whitespace, and `_`/`-`
    /// separators. Returns `None` for anything outside the fixed table.
    #[must_use]
    pub fn from_transaction_type(raw: &str) -> Option<Self> {
        let normalized = raw
            .replace(['_', '-'], " ")
            .split_whitespace()
            .map(str::to_ascii_lowercase)
            .collect::<Vec<_>>()
            .join(" ");

        match normalized.as_str() {
            "sold short" => Some(Self::SoldShort),
            "bought to cover" => Some(Self::BoughtToCover),
            "bought to open" => Some(Self::BoughtToOpen),
            "sold to close" => Some(Self::SoldToClose),
            "option assigned" | "assigned" => Some(Self::Assigned),
            "expired" | "option expired" => Some(Self::Expired),
            _ => None,
        }
    }

    /// The canonical ledger spelling of this action.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::SoldShort => "Sold Short",
            Self::BoughtToCover => "Bought To Cover",
            Self::BoughtToOpen => "Bought To Open",
            Self::SoldToClose => "Sold To Close",
            Self::Assigned => "Option Assigned",
            Self::Expired => "Expired",
        }
    }

    /// Sign applied to the event quantity.
    ///
    /// `None` for actions that flatten the position instead of applying
    /// a quantity (assignment and expiry).
    #[must_use]
    pub const fn sign(&self) -> Option<i64> {
        match self {
            Self::BoughtToCover | Self::BoughtToOpen => Some(1),
            Self::SoldShort | Self::SoldToClose => Some(-1),
            Self::Assigned | Self::Expired => None,
        }
    }

    /// Whether a ledger row for this action must carry a quantity.
    #[must_use]
    pub const fn requires_quantity(&self) -> bool {
        self.sign().is_some()
    }
}

impl fmt::Display for TransactionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The action of one ledger event: recognized, or kept raw for auditing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventAction {
    /// One of the recognized option actions.
    Known(TransactionAction),
    /// A transaction type outside the fixed table (e.g. "Dividend").
    Unrecognized(String),
}

impl EventAction {
    /// Parse a raw ledger transaction type. Never fails.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        TransactionAction::from_transaction_type(raw)
            .map_or_else(|| Self::Unrecognized(raw.trim().to_string()), Self::Known)
    }

    /// The recognized action, if any.
    #[must_use]
    pub const fn known(&self) -> Option<TransactionAction> {
        match self {
            Self::Known(action) => Some(*action),
            Self::Unrecognized(_) => None,
        }
    }

    /// Human-readable label (canonical or raw).
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Known(action) => action.label(),
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl From<TransactionAction> for EventAction {
    fn from(action: TransactionAction) -> Self {
        Self::Known(action)
    }
}

impl fmt::Display for EventAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_every_ledger_spelling() {
        let table = [
            ("Sold Short", TransactionAction::SoldShort),
            ("Bought To Cover", TransactionAction::BoughtToCover),
            ("Option Assigned", TransactionAction::Assigned),
            ("Expired", TransactionAction::Expired),
            ("Bought To Open", TransactionAction::BoughtToOpen),
            ("Sold To Close", TransactionAction::SoldToClose),
        ];

        for (raw, expected) in table {
            assert_eq!(
                TransactionAction::from_transaction_type(raw),
                Some(expected),
                "{raw}"
            );
        }
    }

    #[test]
    fn mapping_ignores_case_and_separators() {
        assert_eq!(
            TransactionAction::from_transaction_type("  sold   SHORT "),
            Some(TransactionAction::SoldShort)
        );
        assert_eq!(
            TransactionAction::from_transaction_type("BOUGHT_TO_COVER"),
            Some(TransactionAction::BoughtToCover)
        );
        assert_eq!(
            TransactionAction::from_transaction_type("sold-to-close"),
            Some(TransactionAction::SoldToClose)
        );
    }

    #[test]
    fn labels_round_trip_through_mapping() {
        for action in TransactionAction::ALL {
            assert_eq!(
                TransactionAction::from_transaction_type(action.label()),
                Some(action)
            );
        }
    }

    #[test]
    fn unknown_types_are_not_mapped() {
        assert_eq!(TransactionAction::from_transaction_type("Dividend"), None);
        assert_eq!(TransactionAction::from_transaction_type("Buy"), None);
        assert_eq!(TransactionAction::from_transaction_type(""), None);
    }

    #[test]
    fn sign_convention() {
        assert_eq!(TransactionAction::SoldShort.sign(), Some(-1));
        assert_eq!(TransactionAction::BoughtToCover.sign(), Some(1));
        assert_eq!(TransactionAction::BoughtToOpen.sign(), Some(1));
        assert_eq!(TransactionAction::SoldToClose.sign(), Some(-1));
        assert_eq!(TransactionAction::Assigned.sign(), None);
        assert_eq!(TransactionAction::Expired.sign(), None);
    }

    #[test]
    fn quantity_actions() {
        assert!(TransactionAction::SoldShort.requires_quantity());
        assert!(!TransactionAction::Assigned.requires_quantity());
        assert!(!TransactionAction::Expired.requires_quantity());
        assert!(TransactionAction::SoldToClose.requires_quantity());
    }

    #[test]
    fn event_action_parse_keeps_raw_text() {
        assert_eq!(
            EventAction::parse("Sold Short"),
            EventAction::Known(TransactionAction::SoldShort)
        );
        assert_eq!(
            EventAction::parse(" Dividend "),
            EventAction::Unrecognized("Dividend".to_string())
        );
        assert_eq!(EventAction::parse("Dividend").label(), "Dividend");
        assert!(EventAction::parse("Dividend").known().is_none());
    }

    #[test]
    fn event_action_serde() {
        let known = EventAction::Known(TransactionAction::BoughtToCover);
        assert_eq!(
            serde_json::to_string(&known).unwrap(),
            "\"BOUGHT_TO_COVER\""
        );

        let parsed: EventAction = serde_json::from_str("\"EXPIRED\"").unwrap();
        assert_eq!(parsed, EventAction::Known(TransactionAction::Expired));

        let raw: EventAction = serde_json::from_str("\"Dividend\"").unwrap();
        assert_eq!(raw, EventAction::Unrecognized("Dividend".to_string()));
    }
}
