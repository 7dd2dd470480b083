//! Transaction Source Adapters
//!
//! Implementations of `TransactionSourcePort`:
//! - `in_memory`: records held in process (tests, `POST /api/v1/reconcile`)
//! - `json_file`: ledger export on disk
//! - `rest`: transactions REST API with retry

mod in_memory;
mod json_file;
mod rest;
mod retry;

use async_trait::async_trait;

pub use in_memory::InMemoryTransactionSource;
pub use json_file::JsonFileTransactionSource;
pub use rest::RestTransactionSource;
pub use retry::RetryPolicy;

use crate::application::ports::{SourceError, TransactionSourcePort};
use crate::config::{SourceConfig, SourceKind};
use crate::domain::ledger::TransactionRecord;

/// Source selected by configuration.
#[derive(Debug)]
pub enum TransactionSource {
    /// In-memory ledger.
    Memory(InMemoryTransactionSource),
    /// JSON ledger export.
    JsonFile(JsonFileTransactionSource),
    /// Transactions REST API.
    Rest(RestTransactionSource),
}

impl TransactionSource {
    /// Build the adapter named by `config.kind`.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` when a required setting is missing or the HTTP
    /// client cannot be built.
    pub fn from_config(config: &SourceConfig) -> Result<Self, SourceError> {
        match config.kind {
            SourceKind::Memory => Ok(Self::Memory(InMemoryTransactionSource::new())),
            SourceKind::JsonFile => {
                let path = config.path.as_deref().ok_or_else(|| SourceError::NotFound {
                    location: "source.path".to_string(),
                })?;
                Ok(Self::JsonFile(JsonFileTransactionSource::new(path)))
            }
            SourceKind::Rest => {
                let base_url =
                    config
                        .base_url
                        .as_deref()
                        .ok_or_else(|| SourceError::NotFound {
                            location: "source.base_url".to_string(),
                        })?;
                let mut source = RestTransactionSource::new(base_url, config.timeout())?
                    .with_retry(RetryPolicy::from(&config.retry));
                if let Some(token) = &config.api_token {
                    source = source.with_api_token(token.clone());
                }
                Ok(Self::Rest(source))
            }
        }
    }

    /// Short adapter name for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::JsonFile(_) => "json_file",
            Self::Rest(_) => "rest",
        }
    }
}

#[async_trait]
impl TransactionSourcePort for TransactionSource {
    async fn fetch_transactions(&self) -> Result<Vec<TransactionRecord>, SourceError> {
        match self {
            Self::Memory(source) => source.fetch_transactions().await,
            Self::JsonFile(source) => source.fetch_transactions().await,
            Self::Rest(source) => source.fetch_transactions().await,
        }
    }
}
