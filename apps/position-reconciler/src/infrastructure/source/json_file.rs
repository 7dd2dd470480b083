//! Transaction source backed by a JSON ledger export.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::ports::{SourceError, TransactionSourcePort};
use crate::domain::ledger::TransactionRecord;

/// Accepted layouts: a bare array, or an object with a `transactions` array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum LedgerPayload {
    Records(Vec<TransactionRecord>),
    Envelope { transactions: Vec<TransactionRecord> },
}

impl LedgerPayload {
    pub(crate) fn into_records(self) -> Vec<TransactionRecord> {
        match self {
            Self::Records(records) | Self::Envelope {
                transactions: records,
            } => records,
        }
    }
}

/// Reads the ledger file on every fetch so edits are picked up.
#[derive(Debug, Clone)]
pub struct JsonFileTransactionSource {
    path: PathBuf,
}

impl JsonFileTransactionSource {
    /// Create a source for the given file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TransactionSourcePort for JsonFileTransactionSource {
    async fn fetch_transactions(&self) -> Result<Vec<TransactionRecord>, SourceError> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => SourceError::NotFound {
                    location: self.path.display().to_string(),
                },
                _ => SourceError::Io {
                    message: format!("{}: {e}", self.path.display()),
                },
            })?;

        let payload: LedgerPayload =
            serde_json::from_str(&contents).map_err(|e| SourceError::Malformed {
                message: format!("{}: {e}", self.path.display()),
            })?;

        let records = payload.into_records();

        tracing::debug!(
            path = %self.path.display(),
            records = records.len(),
            "Loaded ledger file"
        );

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_ledger(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn reads_bare_array() {
        let file = write_ledger(
            r#"[
                {"transaction_date": "2025-06-23", "transaction_type": "Sold Short",
                 "symbol": "CLSK Jul 25 '25 $9 Call", "quantity": 1, "strike": "9"}
            ]"#,
        );

        let source = JsonFileTransactionSource::new(file.path());
        let records = source.fetch_transactions().await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].transaction_type.as_deref(), Some("Sold Short"));
        assert_eq!(records[0].quantity, Some(rust_decimal::Decimal::ONE));
    }

    #[tokio::test]
    async fn reads_envelope() {
        let file = write_ledger(
            r#"{"transactions": [
                {"transaction_date": "2025-06-23", "transaction_type": "Sold Short",
                 "symbol": "CLSK Jul 25 '25 $9 Call", "quantity": 1},
                {"transaction_date": "2025-06-24", "transaction_type": "Bought To Open",
                 "symbol": "AAPL Sep 19 '25 $150 Put", "quantity": 2}
            ]}"#,
        );

        let source = JsonFileTransactionSource::new(file.path());
        let records = source.fetch_transactions().await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[1].symbol.as_deref(),
            Some("AAPL Sep 19 '25 $150 Put")
        );
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let source = JsonFileTransactionSource::new("/nonexistent/ledger.json");
        let err = source.fetch_transactions().await.unwrap_err();

        assert!(matches!(err, SourceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn invalid_json_is_malformed() {
        let file = write_ledger("{not json");
        let source = JsonFileTransactionSource::new(file.path());
        let err = source.fetch_transactions().await.unwrap_err();

        assert!(matches!(err, SourceError::Malformed { .. }));
    }
}
