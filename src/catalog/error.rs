//! Error types for catalog access.

use thiserror::Error;

/// Errors that can occur while fetching or caching catalog data.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Failed to reach the catalog server
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded the configured timeout
    #[error("Request timeout after {duration}s")]
    Timeout { duration: u64 },

    /// Detail requested for an id the server does not know
    #[error("Item {id} not found")]
    NotFound { id: u32 },

    /// Server answered with a non-success status
    #[error("Upstream error: {status}")]
    Upstream { status: u16 },

    /// Response body did not match the expected shape
    #[error("Invalid response: {0}")]
    Decode(String),

    /// Reading or writing the local cache failed
    #[error("Cache error: {0}")]
    Cache(String),
}

impl CatalogError {
    /// Whether a cached copy may stand in for the failed remote call.
    pub fn allows_cache_fallback(&self) -> bool {
        matches!(
            self,
            CatalogError::Network(_) | CatalogError::Timeout { .. } | CatalogError::Upstream { .. }
        )
    }

    /// Short reason shown in the list footer and detail dialog.
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::Network(_) => "network unavailable".to_string(),
            CatalogError::Timeout { .. } => "timeout".to_string(),
            CatalogError::NotFound { id } => format!("#{id} not found"),
            CatalogError::Upstream { status } => format!("server error {status}"),
            CatalogError::Decode(_) => "unexpected response".to_string(),
            CatalogError::Cache(_) => "cache unavailable".to_string(),
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CatalogError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            CatalogError::Upstream {
                status: status.as_u16(),
            }
        } else {
            CatalogError::Network(err.to_string())
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::Cache(err.to_string())
    }
}
