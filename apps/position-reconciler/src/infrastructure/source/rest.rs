//! Transaction source backed by the transactions REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use super::json_file::LedgerPayload;
use super::retry::{ErrorCategory, ExponentialBackoff, RetryPolicy, categorize_status};
use crate::application::ports::{SourceError, TransactionSourcePort};
use crate::domain::ledger::TransactionRecord;

/// HTTP client for the transactions API with retry logic.
#[derive(Debug, Clone)]
pub struct RestTransactionSource {
    client: Client,
    base_url: String,
    api_token: Option<String>,
    retry_policy: RetryPolicy,
}

impl RestTransactionSource {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Unavailable` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Unavailable {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_token: None,
            retry_policy: RetryPolicy::default(),
        })
    }

    /// Send a bearer token with every request.
    #[must_use]
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into()).filter(|t| !t.is_empty());
        self
    }

    /// Set the retry policy.
    #[must_use]
    pub fn with_retry(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    /// URL of the transactions collection.
    #[must_use]
    pub fn transactions_url(&self) -> String {
        format!("{}/transactions", self.base_url)
    }

    async fn get_records(&self) -> Result<Vec<TransactionRecord>, SourceError> {
        let url = self.transactions_url();
        let mut backoff = ExponentialBackoff::new(&self.retry_policy);

        loop {
            let mut request = self.client.get(&url);
            if let Some(token) = &self.api_token {
                request = request.bearer_auth(token);
            }

            let response = match request.send().await {
                Ok(resp) => resp,
                Err(e) => {
                    if let Some(delay) = backoff.next_backoff() {
                        tracing::warn!(
                            error = %e,
                            delay_ms = delay.as_millis(),
                            attempt = backoff.attempt,
                            "Network error, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(SourceError::Unavailable {
                        message: format!("{e} after {} attempts", backoff.attempt),
                    });
                }
            };

            let status = response.status();

            if status.is_success() {
                let text = response
                    .text()
                    .await
                    .map_err(|e| SourceError::Unavailable {
                        message: e.to_string(),
                    })?;
                let payload: LedgerPayload =
                    serde_json::from_str(&text).map_err(|e| SourceError::Malformed {
                        message: e.to_string(),
                    })?;
                return Ok(payload.into_records());
            }

            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());

            let error_body = response.text().await.unwrap_or_default();

            match categorize_status(status) {
                ErrorCategory::RateLimited => {
                    let delay = backoff
                        .next_backoff()
                        .map(|d| retry_after.map_or(d, Duration::from_secs));
                    if let Some(delay) = delay {
                        tracing::warn!(delay_ms = delay.as_millis(), "Rate limited, retrying");
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(SourceError::RateLimited);
                }
                ErrorCategory::Retryable => {
                    if let Some(delay) = backoff.next_backoff() {
                        tracing::warn!(
                            status = status.as_u16(),
                            delay_ms = delay.as_millis(),
                            "Retryable error, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(SourceError::Unavailable {
                        message: format!(
                            "HTTP {} after {} attempts",
                            status.as_u16(),
                            backoff.attempt
                        ),
                    });
                }
                ErrorCategory::NonRetryable => {
                    return Err(match status {
                        StatusCode::NOT_FOUND => SourceError::NotFound { location: url },
                        _ => SourceError::Unavailable {
                            message: format!("HTTP {}: {error_body}", status.as_u16()),
                        },
                    });
                }
            }
        }
    }
}

#[async_trait]
impl TransactionSourcePort for RestTransactionSource {
    async fn fetch_transactions(&self) -> Result<Vec<TransactionRecord>, SourceError> {
        self.get_records().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transactions_url_strips_trailing_slash() {
        let source =
            RestTransactionSource::new("http://localhost:3000/api/", Duration::from_secs(1))
                .unwrap();
        assert_eq!(
            source.transactions_url(),
            "http://localhost:3000/api/transactions"
        );
    }

    #[test]
    fn empty_token_is_ignored() {
        let source = RestTransactionSource::new("http://localhost", Duration::from_secs(1))
            .unwrap()
            .with_api_token("");
        assert!(source.api_token.is_none());
    }
}
