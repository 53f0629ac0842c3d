//! Caller authentication and mutation policy configuration.

use serde::{Deserialize, Serialize};

/// Bearer token verification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret used to verify HS256 access tokens.
    #[serde(default)]
    pub jwt_secret: String,
    /// Allowed clock skew in seconds.
    #[serde(default = "default_leeway")]
    pub jwt_leeway_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_leeway_seconds: default_leeway(),
        }
    }
}

/// Switches for the anonymous write paths.
///
/// Both default to off; a deployment must opt in explicitly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Allow unauthenticated directory deletion.
    #[serde(default)]
    pub allow_anonymous_delete: bool,
    /// Allow unauthenticated directory creation when the request is a sidebar item.
    #[serde(default)]
    pub allow_sidebar_create: bool,
}

fn default_leeway() -> u64 {
    5
}
