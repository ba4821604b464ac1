//! Client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the web API client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebApiConfig {
    /// Base URL for the Discord API (default: <https://discord.com/api>)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// API version path segment (default: `v7`)
    #[serde(default = "default_version")]
    pub version: String,

    /// Request timeout
    #[serde(default = "default_request_timeout", with = "duration_ms")]
    pub request_timeout: Duration,

    /// Request latency at which the client starts logging warnings
    #[serde(default = "default_latency_threshold", with = "duration_ms")]
    pub latency_threshold: Duration,

    /// Milliseconds to offset rate-limit timing calculations by
    #[serde(default)]
    pub ratelimiter_offset: u64,

    /// Retry configuration
    #[serde(default)]
    pub retry: RetryConfig,

    /// OAuth2 application client id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    /// OAuth2 application client secret
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,

    /// OAuth2 redirect URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<String>,
}

fn default_api_url() -> String {
    "https://discord.com/api".into()
}

fn default_version() -> String {
    "v7".into()
}

fn default_request_timeout() -> Duration {
    Duration::from_millis(15_000)
}

fn default_latency_threshold() -> Duration {
    Duration::from_millis(30_000)
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        u64::try_from(duration.as_millis())
            .unwrap_or(u64::MAX)
            .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ms = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(ms))
    }
}

impl WebApiConfig {
    /// Versioned base URL requests are made against.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("{}/{}", self.api_url.trim_end_matches('/'), self.version)
    }
}

impl Default for WebApiConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            version: default_version(),
            request_timeout: default_request_timeout(),
            latency_threshold: default_latency_threshold(),
            ratelimiter_offset: 0,
            retry: RetryConfig::default(),
            client_id: None,
            client_secret: None,
            redirect_uri: None,
        }
    }
}

/// Retry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum retry attempts
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Initial delay between retries in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Maximum delay between retries in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    30_000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}
