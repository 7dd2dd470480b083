//! Structured API errors for the reconciler service.
//!
//! Every failure surfaced over HTTP carries a stable code and a message.
//! Ledger anomalies are not errors; they travel inside successful reports.
//!
//! # HTTP Status Codes
//!
//! | Code | Status | Usage |
//! |------|--------|-------|
//! | `INVALID_REQUEST` | 400 | Malformed query or body |
//! | `INVALID_EVENT` | 422 | Structurally invalid ledger record |
//! | `SOURCE_NOT_FOUND` | 502 | Ledger file or endpoint missing |
//! | `SOURCE_MALFORMED` | 502 | Ledger data could not be decoded |
//! | `SOURCE_UNAVAILABLE` | 502 | Ledger unreachable after retries |
//! | `SOURCE_RATE_LIMITED` | 503 | Ledger API is rate limiting |
//! | `INTERNAL_ERROR` | 500 | Unexpected server error |

use std::collections::HashMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::ports::SourceError;
use crate::application::use_cases::UseCaseError;
use crate::domain::ledger::LedgerError;

/// Error codes for the reconciler API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Invalid request format or parameters.
    InvalidRequest,
    /// Structurally invalid ledger record.
    InvalidEvent,
    /// Ledger file or endpoint missing.
    SourceNotFound,
    /// Ledger data could not be decoded.
    SourceMalformed,
    /// Ledger unreachable.
    SourceUnavailable,
    /// Ledger API is rate limiting.
    SourceRateLimited,
    /// Internal server error.
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status for this error.
    #[must_use]
    pub const fn http_status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::InvalidEvent => StatusCode::UNPROCESSABLE_ENTITY,
            Self::SourceNotFound | Self::SourceMalformed | Self::SourceUnavailable => {
                StatusCode::BAD_GATEWAY
            }
            Self::SourceRateLimited => StatusCode::SERVICE_UNAVAILABLE,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error reason string.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::InvalidEvent => "INVALID_EVENT",
            Self::SourceNotFound => "SOURCE_NOT_FOUND",
            Self::SourceMalformed => "SOURCE_MALFORMED",
            Self::SourceUnavailable => "SOURCE_UNAVAILABLE",
            Self::SourceRateLimited => "SOURCE_RATE_LIMITED",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

/// An API error with context.
#[derive(Debug, Error)]
#[error("[{code}] {message}")]
pub struct ApiError {
    /// Error code.
    code: ErrorCode,
    /// Human-readable message.
    message: String,
    /// Additional context (key-value pairs).
    context: Vec<(String, String)>,
}

impl ApiError {
    /// Create a new API error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: Vec::new(),
        }
    }

    /// Add context to the error.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.push((key.into(), value.into()));
        self
    }

    /// Get the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the context.
    #[must_use]
    pub fn context(&self) -> &[(String, String)] {
        &self.context
    }

    /// Convert to the JSON error body.
    #[must_use]
    pub fn to_http_response(&self) -> HttpErrorResponse {
        HttpErrorResponse {
            code: self.code.reason().to_string(),
            message: self.message.clone(),
            details: self.context.iter().cloned().collect(),
        }
    }

    /// Invalid request format.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }
}

/// HTTP error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpErrorResponse {
    /// Error code string.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Additional details.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub details: HashMap<String, String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.http_status();
        if status.is_server_error() {
            tracing::error!(code = %self.code, message = %self.message, "Request failed");
        }
        (status, Json(self.to_http_response())).into_response()
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        match err {
            LedgerError::InvalidEvent { sequence, .. } => {
                Self::new(ErrorCode::InvalidEvent, message)
                    .with_context("sequence", sequence.to_string())
            }
        }
    }
}

impl From<SourceError> for ApiError {
    fn from(err: SourceError) -> Self {
        let code = match &err {
            SourceError::NotFound { .. } => ErrorCode::SourceNotFound,
            SourceError::Malformed { .. } => ErrorCode::SourceMalformed,
            SourceError::Unavailable { .. } => ErrorCode::SourceUnavailable,
            SourceError::RateLimited => ErrorCode::SourceRateLimited,
            SourceError::Io { .. } => ErrorCode::InternalError,
        };
        Self::new(code, err.to_string())
    }
}

impl From<UseCaseError> for ApiError {
    fn from(err: UseCaseError) -> Self {
        match err {
            UseCaseError::Source(e) => e.into(),
            UseCaseError::Ledger(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_http_mapping() {
        assert_eq!(
            ErrorCode::InvalidRequest.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::InvalidEvent.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ErrorCode::SourceUnavailable.http_status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ErrorCode::SourceRateLimited.http_status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ErrorCode::InternalError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_code_serde_matches_reason() {
        let json = serde_json::to_string(&ErrorCode::InvalidEvent).unwrap();
        assert_eq!(json, "\"INVALID_EVENT\"");
    }

    #[test]
    fn test_api_error_creation() {
        let error = ApiError::new(ErrorCode::InvalidRequest, "Bad request")
            .with_context("field", "as_of")
            .with_context("value", "yesterday");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.message(), "Bad request");
        assert_eq!(error.context().len(), 2);
    }

    #[test]
    fn test_from_ledger_error() {
        let error = ApiError::from(LedgerError::invalid_event(3, "missing symbol"));

        assert_eq!(error.code(), ErrorCode::InvalidEvent);
        let body = error.to_http_response();
        assert_eq!(body.code, "INVALID_EVENT");
        assert_eq!(body.details.get("sequence").map(String::as_str), Some("3"));
        assert!(body.message.contains("missing symbol"));
    }

    #[test]
    fn test_from_source_error() {
        assert_eq!(
            ApiError::from(SourceError::RateLimited).code(),
            ErrorCode::SourceRateLimited
        );
        assert_eq!(
            ApiError::from(SourceError::Io {
                message: "denied".to_string()
            })
            .code(),
            ErrorCode::InternalError
        );
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::invalid_request("bad date").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_error_display() {
        let error = ApiError::invalid_request("Missing field");
        assert_eq!(error.to_string(), "[INVALID_REQUEST] Missing field");
    }
}
