//! HTTP response DTOs.

use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
    /// Configured transaction source.
    pub source: String,
}

impl HealthResponse {
    /// Healthy response for the given version and source.
    #[must_use]
    pub fn healthy(version: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            version: version.into(),
            source: source.into(),
        }
    }
}
