//! HTTP request DTOs.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ledger::{TransactionRecord, parse_ledger_date};
use crate::domain::shared::{DomainError, Symbol};
use crate::error::ApiError;

/// Query string for `GET /api/v1/positions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PositionsQuery {
    /// Restrict to one underlying ticker.
    #[serde(default)]
    pub underlying: Option<String>,
    /// Date stale positions are judged against (defaults to today, UTC).
    #[serde(default)]
    pub as_of: Option<String>,
}

impl PositionsQuery {
    /// Validated underlying filter.
    pub fn underlying_symbol(&self) -> Result<Option<Symbol>, ApiError> {
        self.underlying
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .map(|u| {
                let symbol = Symbol::new(u);
                symbol.validate().map(|()| symbol).map_err(invalid_symbol)
            })
            .transpose()
    }

    /// Parsed `as_of`, or today.
    pub fn as_of_date(&self) -> Result<NaiveDate, ApiError> {
        parse_as_of(self.as_of.as_deref())
    }
}

/// Body for `POST /api/v1/reconcile`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileRequest {
    /// Ledger records in ingestion order.
    pub records: Vec<TransactionRecord>,
    /// Date stale positions are judged against (defaults to today, UTC).
    #[serde(default)]
    pub as_of: Option<String>,
}

impl ReconcileRequest {
    /// Parsed `asOf`, or today.
    pub fn as_of_date(&self) -> Result<NaiveDate, ApiError> {
        parse_as_of(self.as_of.as_deref())
    }
}

fn parse_as_of(raw: Option<&str>) -> Result<NaiveDate, ApiError> {
    match raw.filter(|r| !r.trim().is_empty()) {
        None => Ok(Utc::now().date_naive()),
        Some(raw) => parse_ledger_date(raw).ok_or_else(|| {
            ApiError::invalid_request(format!("as_of '{raw}' is not a valid date"))
                .with_context("field", "as_of")
        }),
    }
}

fn invalid_symbol(err: DomainError) -> ApiError {
    ApiError::invalid_request(err.to_string()).with_context("field", "underlying")
}
