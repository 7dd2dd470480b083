//! Transaction Source Port (Driven Port)
//!
//! Interface for reading brokerage transaction records from the ledger.

use async_trait::async_trait;

use crate::domain::ledger::TransactionRecord;

/// Transaction source error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// Source could not be reached or kept failing after retries.
    #[error("Transaction source unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// Source is rate limiting requests.
    #[error("Rate limited by transaction source")]
    RateLimited,

    /// Source answered with data that could not be decoded.
    #[error("Malformed transaction data: {message}")]
    Malformed {
        /// Error details.
        message: String,
    },

    /// Ledger file or endpoint does not exist.
    #[error("Transaction source not found: {location}")]
    NotFound {
        /// Path or URL that was requested.
        location: String,
    },

    /// Local I/O failure.
    #[error("I/O error reading transactions: {message}")]
    Io {
        /// Error details.
        message: String,
    },
}

/// Port for reading the transaction ledger.
#[async_trait]
pub trait TransactionSourcePort: Send + Sync {
    /// Fetch the whole ledger, in ledger order.
    ///
    /// Record positions in the returned batch are the ledger row numbers
    /// reported in `InvalidEvent` errors and anomalies.
    async fn fetch_transactions(&self) -> Result<Vec<TransactionRecord>, SourceError>;
}
