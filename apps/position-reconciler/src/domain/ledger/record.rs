//! Raw ledger records as the transaction source supplies them.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::{EventAction, LedgerError, TransactionEvent};
use crate::domain::shared::ContractId;

/// Date layouts seen in brokerage exports, tried in order.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Datetime layouts from SQL stores, reduced to their date.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// One row of the transaction ledger.
///
/// Every field is optional at the boundary; [`TransactionRecord::to_event`]
/// decides which omissions are fatal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Date the transaction was recorded.
    pub transaction_date: Option<String>,
    /// Ledger transaction type (e.g. "Sold Short").
    pub transaction_type: Option<String>,
    /// Contract identifier (e.g. "CLSK Jul 25 '25 $9 Call").
    pub symbol: Option<String>,
    /// Contract count, signed or unsigned depending on the broker.
    pub quantity: Option<Decimal>,
    /// Strike price, informational.
    pub strike: Option<Decimal>,
    /// Free-text description, informational.
    pub description: Option<String>,
}

impl TransactionRecord {
    /// Create a record with the fields reconciliation reads.
    #[must_use]
    pub fn new(
        transaction_date: impl Into<String>,
        transaction_type: impl Into<String>,
        symbol: impl Into<String>,
        quantity: Option<Decimal>,
    ) -> Self {
        Self {
            transaction_date: Some(transaction_date.into()),
            transaction_type: Some(transaction_type.into()),
            symbol: Some(symbol.into()),
            quantity,
            strike: None,
            description: None,
        }
    }

    /// Convert the record into an event at position `sequence`.
    ///
    /// A missing transaction type is treated as an unrecognized action,
    /// not as a structural error.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidEvent` when the contract id or date is
    /// missing or malformed, when a quantity-bearing action has no quantity,
    /// or when a quantity is fractional or does not fit a contract count.
    pub fn to_event(&self, sequence: usize) -> Result<TransactionEvent, LedgerError> {
        let symbol = self
            .symbol
            .as_deref()
            .ok_or_else(|| LedgerError::invalid_event(sequence, "missing symbol"))?;
        let contract_id = ContractId::new(symbol)
            .map_err(|_| LedgerError::invalid_event(sequence, "blank symbol"))?;

        let raw_date = self
            .transaction_date
            .as_deref()
            .ok_or_else(|| LedgerError::invalid_event(sequence, "missing transaction_date"))?;
        let date = parse_ledger_date(raw_date).ok_or_else(|| {
            LedgerError::invalid_event(
                sequence,
                format!("unparseable transaction_date '{raw_date}'"),
            )
        })?;

        let action = EventAction::parse(self.transaction_type.as_deref().unwrap_or_default());

        let requires_quantity = action.known().is_some_and(|a| a.requires_quantity());
        let quantity = match self.quantity {
            Some(quantity) => whole_contracts(quantity)
                .map_err(|reason| LedgerError::invalid_event(sequence, reason))?,
            None if requires_quantity => {
                return Err(LedgerError::invalid_event(
                    sequence,
                    format!("missing quantity for '{}'", action.label()),
                ));
            }
            None => 0,
        };

        Ok(TransactionEvent::new(
            sequence,
            date,
            contract_id,
            action,
            quantity,
        ))
    }
}

/// Convert every record into an event, failing on the first invalid one.
///
/// Sequences are assigned from each record's position in `records`.
pub fn events_from_records(
    records: &[TransactionRecord],
) -> Result<Vec<TransactionEvent>, LedgerError> {
    records
        .iter()
        .enumerate()
        .map(|(sequence, record)| record.to_event(sequence))
        .collect()
}

/// Parse a ledger date in any of the supported layouts.
#[must_use]
pub fn parse_ledger_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

fn whole_contracts(quantity: Decimal) -> Result<i64, String> {
    if !quantity.fract().is_zero() {
        return Err(format!(
            "quantity {quantity} is not a whole number of contracts"
        ));
    }
    quantity
        .to_i64()
        .ok_or_else(|| format!("quantity {quantity} is out of range"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ledger::TransactionAction;

    fn record(kind: &str, qty: Option<i64>) -> TransactionRecord {
        TransactionRecord::new(
            "2025-06-23",
            kind,
            "CLSK Jul 25 '25 $9 Call",
            qty.map(Decimal::from),
        )
    }

    #[test]
    fn to_event_maps_fields() {
        let event = record("Sold Short", Some(1)).to_event(7).unwrap();

        assert_eq!(event.sequence(), 7);
        assert_eq!(event.date(), NaiveDate::from_ymd_opt(2025, 6, 23).unwrap());
        assert_eq!(event.contract_id().as_str(), "CLSK Jul 25 '25 $9 Call");
        assert_eq!(event.known_action(), Some(TransactionAction::SoldShort));
        assert_eq!(event.quantity(), 1);
    }

    #[test]
    fn to_event_accepts_negative_quantity() {
        let event = record("Sold Short", Some(-2)).to_event(0).unwrap();
        assert_eq!(event.signed_quantity(), Some(-2));
    }

    #[test]
    fn to_event_missing_symbol_is_invalid() {
        let mut r = record("Sold Short", Some(1));
        r.symbol = None;

        let err = r.to_event(2).unwrap_err();
        assert_eq!(err, LedgerError::invalid_event(2, "missing symbol"));
    }

    #[test]
    fn to_event_blank_symbol_is_invalid() {
        let mut r = record("Sold Short", Some(1));
        r.symbol = Some("   ".to_string());
        assert!(matches!(
            r.to_event(0),
            Err(LedgerError::InvalidEvent { sequence: 0, .. })
        ));
    }

    #[test]
    fn to_event_missing_or_bad_date_is_invalid() {
        let mut r = record("Sold Short", Some(1));
        r.transaction_date = None;
        assert!(r.to_event(0).is_err());

        r.transaction_date = Some("yesterday".to_string());
        let err = r.to_event(5).unwrap_err();
        assert!(err.to_string().contains("yesterday"));
        assert!(err.to_string().contains("record 5"));
    }

    #[test]
    fn to_event_missing_quantity_only_matters_for_quantity_actions() {
        assert!(record("Sold Short", None).to_event(0).is_err());
        assert!(record("Bought To Cover", None).to_event(0).is_err());

        let assigned = record("Option Assigned", None).to_event(0).unwrap();
        assert_eq!(assigned.quantity(), 0);

        let unknown = record("Dividend", None).to_event(0).unwrap();
        assert!(unknown.known_action().is_none());
    }

    #[test]
    fn to_event_fractional_quantity_is_invalid() {
        let mut r = record("Sold Short", None);
        r.quantity = Some(Decimal::new(15, 1));

        let err = r.to_event(0).unwrap_err();
        assert_eq!(
            err,
            LedgerError::invalid_event(0, "quantity 1.5 is not a whole number of contracts")
        );
    }

    #[test]
    fn to_event_oversized_quantity_is_out_of_range() {
        let mut r = record("Sold Short", None);
        r.quantity = Some(Decimal::MAX);

        let err = r.to_event(4).unwrap_err();
        assert_eq!(
            err,
            LedgerError::invalid_event(4, format!("quantity {} is out of range", Decimal::MAX))
        );
        assert!(!err.to_string().contains("whole number"));
    }

    #[test]
    fn to_event_missing_type_is_unrecognized() {
        let mut r = record("Sold Short", Some(1));
        r.transaction_type = None;

        let event = r.to_event(0).unwrap();
        assert_eq!(event.action(), &EventAction::Unrecognized(String::new()));
    }

    #[test]
    fn parse_ledger_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 7, 26).unwrap();

        assert_eq!(parse_ledger_date("2025-07-26"), Some(expected));
        assert_eq!(parse_ledger_date("07/26/2025"), Some(expected));
        assert_eq!(parse_ledger_date(" 7/26/2025 "), Some(expected));
        assert_eq!(parse_ledger_date("2025-07-26 15:30:00"), Some(expected));
        assert_eq!(parse_ledger_date("2025-07-26T15:30:00Z"), Some(expected));
        assert_eq!(parse_ledger_date("not a date"), None);
    }

    #[test]
    fn events_from_records_assigns_sequences() {
        let records = vec![record("Sold Short", Some(1)), record("Option Assigned", None)];
        let events = events_from_records(&records).unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].sequence(), 0);
        assert_eq!(events[1].sequence(), 1);
    }

    #[test]
    fn events_from_records_fails_on_first_invalid() {
        let mut bad = record("Sold Short", Some(1));
        bad.symbol = None;
        let records = vec![record("Sold Short", Some(1)), bad];

        let err = events_from_records(&records).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidEvent { sequence: 1, .. }));
    }

    #[test]
    fn record_deserializes_numeric_and_string_quantities() {
        let json = r#"[
            {"transaction_date": "2025-06-23", "transaction_type": "Sold Short",
             "symbol": "CLSK Jul 25 '25 $9 Call", "quantity": 1, "strike": 9.0},
            {"transaction_date": "2025-06-24", "transaction_type": "Sold Short",
             "symbol": "CLSK Jul 25 '25 $9 Call", "quantity": "-1", "description": "CALL"}
        ]"#;

        let records: Vec<TransactionRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records[0].quantity, Some(Decimal::ONE));
        assert_eq!(records[1].quantity, Some(Decimal::NEGATIVE_ONE));
        assert_eq!(records[1].description.as_deref(), Some("CALL"));
        assert!(records[1].strike.is_none());
    }
}
