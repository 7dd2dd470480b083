//! In-memory transaction source for testing and development.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::application::ports::{SourceError, TransactionSourcePort};
use crate::domain::ledger::TransactionRecord;

/// In-memory implementation of `TransactionSourcePort`.
///
/// Suitable for testing and development. Not for production use.
#[derive(Debug, Default)]
pub struct InMemoryTransactionSource {
    records: RwLock<Vec<TransactionRecord>>,
}

impl InMemoryTransactionSource {
    /// Create a new empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source pre-loaded with records.
    #[must_use]
    pub fn with_records(records: Vec<TransactionRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Get the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if the source is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append records in ledger order.
    pub fn extend(&self, records: impl IntoIterator<Item = TransactionRecord>) {
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(records);
    }

    /// Remove all records.
    pub fn clear(&self) {
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[async_trait]
impl TransactionSourcePort for InMemoryTransactionSource {
    async fn fetch_transactions(&self) -> Result<Vec<TransactionRecord>, SourceError> {
        Ok(self
            .records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }
}
