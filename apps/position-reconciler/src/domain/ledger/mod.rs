//! Ledger Bounded Context
//!
//! Brokerage transaction records and the option events derived from them:
//! - Raw ledger rows as the transaction source supplies them
//! - The fixed mapping from ledger transaction types to actions
//! - Structural validation (`InvalidEvent`)

pub mod action;
pub mod errors;
pub mod event;
pub mod record;

pub use action::{EventAction, TransactionAction};
pub use errors::LedgerError;
pub use event::TransactionEvent;
pub use record::{TransactionRecord, events_from_records, parse_ledger_date};
