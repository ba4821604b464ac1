//! The REST request capability and its HTTP implementation.
//!
//! Every network operation in this crate goes through [`RestClient`], an
//! object-safe trait the client holds by composition. [`HttpRestClient`] is
//! the reqwest-backed implementation with retries and rate-limit handling;
//! tests substitute an in-process fake.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    config::WebApiConfig,
    error::{WebApiError, WebApiResult},
};

/// Authentication attached to a single request.
#[derive(Debug, Clone)]
pub struct Auth {
    /// Authorization scheme, e.g. `Bot` or `Bearer`.
    pub scheme: String,

    /// Credential string for the scheme.
    pub credentials: String,
}

impl Auth {
    /// Bot-token authentication.
    #[must_use]
    pub fn bot(token: impl Into<String>) -> Self {
        Self {
            scheme: "Bot".into(),
            credentials: token.into(),
        }
    }

    /// Bearer-token authentication.
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            scheme: "Bearer".into(),
            credentials: token.into(),
        }
    }

    fn header_value(&self) -> String {
        format!("{} {}", self.scheme, self.credentials)
    }
}

/// Per-request options passed through the [`RestClient`] capability.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Authentication to attach, if any.
    pub auth: Option<Auth>,

    /// Value for the `Content-Type` header.
    pub content_type: Option<String>,
}

impl RequestOptions {
    /// Bot-token authentication with a JSON content type.
    #[must_use]
    pub fn bot(token: impl Into<String>) -> Self {
        Self {
            auth: Some(Auth::bot(token)),
            content_type: Some("application/json".into()),
        }
    }
}

/// Capability for performing authenticated HTTP requests against the API.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// Perform a request and return the parsed response body.
    ///
    /// Empty success bodies decode to [`Value::Null`]. Non-2xx responses
    /// fail with an error carrying the HTTP status or Discord error code.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        options: RequestOptions,
    ) -> WebApiResult<Value>;
}

/// reqwest-backed [`RestClient`] with bounded retries.
///
/// Rate limits (429) are retried after the server-provided `retry-after`
/// plus the configured clock offset; 5xx and connection errors back off
/// exponentially up to the configured cap.
#[derive(Debug, Clone)]
pub struct HttpRestClient {
    client: Client,
    base_url: String,
    latency_threshold: Duration,
    ratelimiter_offset: Duration,
    max_retries: u32,
    initial_delay: Duration,
    max_delay: Duration,
}

impl HttpRestClient {
    /// Create a new client from configuration.
    pub fn new(config: &WebApiConfig) -> WebApiResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(format!("discord-webapi/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url(),
            latency_threshold: config.latency_threshold,
            ratelimiter_offset: Duration::from_millis(config.ratelimiter_offset),
            max_retries: config.retry.max_attempts,
            initial_delay: Duration::from_millis(config.retry.initial_delay_ms),
            max_delay: Duration::from_millis(config.retry.max_delay_ms),
        })
    }

    async fn handle_response(response: Response) -> WebApiResult<Value> {
        let status = response.status();

        // Handle rate limiting
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<f64>().ok())
                .unwrap_or(30.0);

            return Err(WebApiError::RateLimited { retry_after });
        }

        let bytes = response.bytes().await?;

        if status.is_success() {
            if bytes.is_empty() {
                return Ok(Value::Null);
            }
            serde_json::from_slice(&bytes).map_err(WebApiError::from)
        } else {
            // Try to parse the Discord error body
            #[derive(Deserialize)]
            struct ApiErrorBody {
                code: Option<i32>,
                message: Option<String>,
                retry_after: Option<f64>,
            }

            let error: ApiErrorBody = serde_json::from_slice(&bytes).unwrap_or(ApiErrorBody {
                code: Some(i32::from(status.as_u16())),
                message: Some(String::from_utf8_lossy(&bytes).into_owned()),
                retry_after: None,
            });

            Err(WebApiError::Api {
                code: error.code.unwrap_or_else(|| i32::from(status.as_u16())),
                message: error.message.unwrap_or_else(|| "Unknown error".into()),
                retry_after: error.retry_after,
            })
        }
    }
}

#[async_trait]
impl RestClient for HttpRestClient {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        options: RequestOptions,
    ) -> WebApiResult<Value> {
        let url = format!("{}{}", self.base_url, path);
        let mut delay = self.initial_delay;
        let mut attempts = 0;

        loop {
            attempts += 1;
            debug!(attempt = attempts, %method, path, "requesting");

            let mut req = self.client.request(method.clone(), &url);

            if let Some(auth) = &options.auth {
                req = req.header("Authorization", auth.header_value());
            }
            if let Some(content_type) = &options.content_type {
                req = req.header("Content-Type", content_type.clone());
            }
            if let Some(b) = &body {
                req = req.json(b);
            }

            let started = Instant::now();
            let result = req.send().await;
            let latency = started.elapsed();

            if latency > self.latency_threshold {
                warn!(
                    latency_ms = latency.as_millis(),
                    path, "request latency above threshold"
                );
            }

            match result {
                Ok(response) => {
                    match Self::handle_response(response).await {
                        Ok(data) => return Ok(data),
                        Err(e) if e.is_retryable() && attempts < self.max_retries => {
                            if let Some(retry_after) = e.retry_after() {
                                delay = retry_after + self.ratelimiter_offset;
                            }
                            warn!(
                                attempt = attempts,
                                delay_ms = delay.as_millis(),
                                error = %e,
                                "retrying request"
                            );
                            tokio::time::sleep(delay).await;
                            delay = std::cmp::min(delay * 2, self.max_delay);
                        }
                        Err(e) => return Err(e),
                    }
                }
                Err(e) if e.is_timeout() || e.is_connect() => {
                    if attempts < self.max_retries {
                        warn!(
                            attempt = attempts,
                            delay_ms = delay.as_millis(),
                            error = %e,
                            "retrying after connection error"
                        );
                        tokio::time::sleep(delay).await;
                        delay = std::cmp::min(delay * 2, self.max_delay);
                    } else {
                        return Err(WebApiError::Http(e));
                    }
                }
                Err(e) => return Err(WebApiError::Http(e)),
            }
        }
    }
}
