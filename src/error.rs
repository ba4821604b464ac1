//! Error types for web API operations.

use std::time::Duration;

use thiserror::Error;

/// Errors produced by web API operations.
#[derive(Error, Debug)]
pub enum WebApiError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Discord API returned an error
    #[error("Discord API error {code}: {message}")]
    Api {
        code: i32,
        message: String,
        retry_after: Option<f64>,
    },

    /// Rate limited
    #[error("Rate limited, retry after {retry_after} seconds")]
    RateLimited { retry_after: f64 },

    /// Client is missing configuration required for the operation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl WebApiError {
    /// Check if this error is retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) => true,
            Self::Api { code, .. } => *code >= 500 || *code == 429,
            Self::RateLimited { .. } => true,
            Self::Json(_) | Self::InvalidConfig(_) => false,
        }
    }

    /// Get the suggested retry delay.
    #[must_use]
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => Some(Duration::from_secs_f64(*retry_after)),
            Self::Api { retry_after, .. } => retry_after.map(Duration::from_secs_f64),
            _ => None,
        }
    }
}

/// Result type for web API operations.
pub type WebApiResult<T> = Result<T, WebApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_and_rate_limits_are_retryable() {
        let server = WebApiError::Api {
            code: 502,
            message: "Bad Gateway".into(),
            retry_after: None,
        };
        assert!(server.is_retryable());

        let limited = WebApiError::RateLimited { retry_after: 1.5 };
        assert!(limited.is_retryable());
        assert_eq!(limited.retry_after(), Some(Duration::from_secs_f64(1.5)));
    }

    #[test]
    fn client_errors_are_not_retryable() {
        let forbidden = WebApiError::Api {
            code: 50001,
            message: "Missing Access".into(),
            retry_after: None,
        };
        assert!(!forbidden.is_retryable());
        assert_eq!(forbidden.retry_after(), None);
    }
}
