//! Transaction Event Value Object

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{EventAction, TransactionAction};
use crate::domain::shared::ContractId;

/// One option event from the ledger, placed on a contract's timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionEvent {
    /// Position in the input batch (ingestion order).
    sequence: usize,
    /// Date the event was recorded.
    date: NaiveDate,
    /// Contract the event applies to.
    contract_id: ContractId,
    /// What happened.
    action: EventAction,
    /// Number of contracts, always non-negative.
    quantity: i64,
}

impl TransactionEvent {
    /// Create a new event.
    ///
    /// The ledger may report quantities signed or unsigned; only the
    /// magnitude is kept; the action decides the sign.
    #[must_use]
    pub fn new(
        sequence: usize,
        date: NaiveDate,
        contract_id: ContractId,
        action: impl Into<EventAction>,
        quantity: i64,
    ) -> Self {
        Self {
            sequence,
            date,
            contract_id,
            action: action.into(),
            quantity: quantity.saturating_abs(),
        }
    }

    /// Get the ingestion sequence.
    #[must_use]
    pub const fn sequence(&self) -> usize {
        self.sequence
    }

    /// Get the event date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Get the contract id.
    #[must_use]
    pub const fn contract_id(&self) -> &ContractId {
        &self.contract_id
    }

    /// Get the action.
    #[must_use]
    pub const fn action(&self) -> &EventAction {
        &self.action
    }

    /// Get the recognized action, if any.
    #[must_use]
    pub const fn known_action(&self) -> Option<TransactionAction> {
        self.action.known()
    }

    /// Get the quantity magnitude.
    #[must_use]
    pub const fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Signed delta for quantity-bearing actions.
    ///
    /// `None` for assignment, expiry, and unrecognized actions.
    #[must_use]
    pub fn signed_quantity(&self) -> Option<i64> {
        self.known_action()
            .and_then(|action| action.sign())
            .map(|sign| sign * self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract() -> ContractId {
        ContractId::new("CLSK Jul 25 '25 $9 Call").unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 23).unwrap()
    }

    #[test]
    fn event_new_keeps_magnitude() {
        let event = TransactionEvent::new(0, date(), contract(), TransactionAction::SoldShort, -2);
        assert_eq!(event.quantity(), 2);
        assert_eq!(event.signed_quantity(), Some(-2));
    }

    #[test]
    fn event_signed_quantity_per_action() {
        let qty = |action: TransactionAction| {
            TransactionEvent::new(0, date(), contract(), action, 3).signed_quantity()
        };

        assert_eq!(qty(TransactionAction::SoldShort), Some(-3));
        assert_eq!(qty(TransactionAction::BoughtToCover), Some(3));
        assert_eq!(qty(TransactionAction::BoughtToOpen), Some(3));
        assert_eq!(qty(TransactionAction::SoldToClose), Some(-3));
        assert_eq!(qty(TransactionAction::Assigned), None);
        assert_eq!(qty(TransactionAction::Expired), None);
    }

    #[test]
    fn event_unrecognized_has_no_delta() {
        let event = TransactionEvent::new(
            4,
            date(),
            contract(),
            EventAction::Unrecognized("Dividend".to_string()),
            10,
        );
        assert_eq!(event.sequence(), 4);
        assert!(event.known_action().is_none());
        assert_eq!(event.signed_quantity(), None);
    }

    #[test]
    fn event_accessors() {
        let event = TransactionEvent::new(1, date(), contract(), TransactionAction::Assigned, 0);
        assert_eq!(event.date(), date());
        assert_eq!(event.contract_id(), &contract());
        assert_eq!(
            event.action(),
            &EventAction::Known(TransactionAction::Assigned)
        );
    }
}
