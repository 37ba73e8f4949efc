//! # Client Configuration
//!
//! Configuration for the API client.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Explicit values passed to `from_env_or` (highest priority)         │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     CARGODESK_API_URL=https://api.example.com/api/v1                   │
//! │     CARGODESK_TIMEOUT_SECS=30                                          │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:4000/api/v1, 30s request / 10s connect            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

/// Configuration for [`crate::ApiClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST API, including any path prefix.
    pub base_url: String,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl ClientConfig {
    /// Creates a config from an explicit base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        ClientConfig {
            base_url: base_url.into(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }

    /// Creates a config from environment variables or provided values.
    pub fn from_env_or(base_url: Option<String>) -> Self {
        let base_url = base_url
            .or_else(|| std::env::var("CARGODESK_API_URL").ok())
            .unwrap_or_else(|| "http://localhost:4000/api/v1".to_string());

        let timeout_secs = std::env::var("CARGODESK_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        ClientConfig {
            base_url,
            timeout_secs,
            connect_timeout_secs: 10,
        }
    }

    /// Joins a relative path onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig::from_env_or(None)
    }
}
