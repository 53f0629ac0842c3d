//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Result of deleting a file chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedChainResponse {
    /// Versions removed.
    pub versions: u64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
    /// Active store backend.
    pub store: String,
    /// Database connectivity, when the postgres backend is active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    /// Uptime.
    pub uptime_seconds: u64,
}
