//! Ledger Errors

use thiserror::Error;

/// Errors raised while turning ledger records into events.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// A record is structurally unusable and cannot be placed on any
    /// contract's timeline. Fails the whole batch.
    #[error("Invalid event at record {sequence}: {reason}")]
    InvalidEvent {
        /// Position of the record in the input batch.
        sequence: usize,
        /// What is missing or malformed.
        reason: String,
    },
}

impl LedgerError {
    /// Build an `InvalidEvent` error.
    pub fn invalid_event(sequence: usize, reason: impl Into<String>) -> Self {
        Self::InvalidEvent {
            sequence,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = LedgerError::invalid_event(3, "missing symbol");
        assert_eq!(err.to_string(), "Invalid event at record 3: missing symbol");
    }
}
