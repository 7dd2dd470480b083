//! Transaction source configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Which adapter supplies transaction records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Empty in-memory ledger (records only arrive via `POST /api/v1/reconcile`).
    #[default]
    Memory,
    /// Ledger export read from a JSON file.
    JsonFile,
    /// Transactions REST API.
    Rest,
}

/// Transaction source configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Adapter kind.
    #[serde(default)]
    pub kind: SourceKind,
    /// Path to the ledger export (`json_file`).
    #[serde(default)]
    pub path: Option<String>,
    /// Base URL of the transactions API (`rest`).
    #[serde(default)]
    pub base_url: Option<String>,
    /// Bearer token for the transactions API.
    #[serde(default)]
    pub api_token: Option<String>,
    /// HTTP request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Retry policy for the transactions API.
    #[serde(default)]
    pub retry: RetrySettings,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::default(),
            path: None,
            base_url: None,
            api_token: None,
            timeout_ms: default_timeout_ms(),
            retry: RetrySettings::default(),
        }
    }
}

impl SourceConfig {
    /// HTTP request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Retry settings for the transactions API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrySettings {
    /// Maximum number of attempts, including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Initial backoff in milliseconds.
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
    /// Maximum backoff in milliseconds.
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
    /// Backoff multiplier.
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            multiplier: default_multiplier(),
        }
    }
}

const fn default_timeout_ms() -> u64 {
    30_000
}

const fn default_max_attempts() -> u32 {
    3
}

const fn default_initial_backoff_ms() -> u64 {
    100
}

const fn default_max_backoff_ms() -> u64 {
    10_000
}

const fn default_multiplier() -> f64 {
    2.0
}
