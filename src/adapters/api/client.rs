//! ATAIX HTTP Client - Rate-limited REST API Client
//!
//! Wraps reqwest with a global inter-request rate limiter, bounded
//! retries, and static API-key authentication for all ATAIX REST API
//! interactions. The exchange rate-limits and expects spaced requests,
//! so every outgoing call first waits on a `governor` limiter that
//! enforces a minimum interval between requests.

use std::time::Duration;

use anyhow::{Context, Result};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::{Client, Method, StatusCode};
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Errors from the ATAIX REST transport.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("exchange returned {status}: {body}")]
    Http { status: StatusCode, body: String },
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("max retries exceeded")]
    RetriesExhausted,
}

/// Static API credentials, loaded from the environment.
///
/// ATAIX authenticates with a single `X-API-Key` header; the key is
/// never read from the config file.
pub struct ApiCredentials {
    api_key: String,
}

impl ApiCredentials {
    /// Load credentials from the `ATAIX_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ATAIX_API_KEY").context("ATAIX_API_KEY not set")?;
        Ok(Self { api_key })
    }
}

/// Configuration for the ATAIX HTTP client.
#[derive(Debug, Clone)]
pub struct AtaixClientConfig {
    /// Base URL for the exchange API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient errors.
    pub max_retries: u32,
    /// Base delay between retries (exponential backoff).
    pub retry_base_delay: Duration,
    /// Minimum spacing between successive requests to the exchange.
    pub min_request_interval: Duration,
}

impl Default for AtaixClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.ataix.kz".to_string(),
            timeout: Duration::from_secs(20),
            max_retries: 3,
            retry_base_delay: Duration::from_millis(200),
            min_request_interval: Duration::from_secs(1),
        }
    }
}

/// Rate-limited HTTP client for the ATAIX REST API.
pub struct AtaixClient {
    /// Underlying HTTP client.
    http: Client,
    /// Static key credentials.
    credentials: ApiCredentials,
    /// Client configuration.
    config: AtaixClientConfig,
    /// Global inter-request spacing limiter.
    limiter: DefaultDirectRateLimiter,
}

impl AtaixClient {
    /// Create a new ATAIX client.
    pub fn new(credentials: ApiCredentials, config: AtaixClientConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(2)
            .build()
            .context("Failed to build HTTP client")?;

        let quota = Quota::with_period(config.min_request_interval)
            .context("min request interval must be non-zero")?;
        let limiter = RateLimiter::direct(quota);

        Ok(Self {
            http,
            credentials,
            config,
            limiter,
        })
    }

    /// Execute a GET request.
    pub async fn get(&self, path: &str) -> Result<serde_json::Value, ApiError> {
        self.execute_with_retry(Method::GET, path, None).await
    }

    /// Execute a DELETE request.
    pub async fn delete(&self, path: &str) -> Result<serde_json::Value, ApiError> {
        self.execute_with_retry(Method::DELETE, path, None).await
    }

    /// Execute a POST request with a JSON body.
    pub async fn post(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, ApiError> {
        self.execute_with_retry(Method::POST, path, Some(body)).await
    }

    /// Execute a request with auth, rate limiting, and retries.
    ///
    /// Transient failures (connection errors, timeouts, 429, 5xx) are
    /// retried with exponential backoff; other HTTP errors are final.
    /// An empty response body decodes to `Value::Null`, which callers
    /// treat as an empty successful result.
    async fn execute_with_retry(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<serde_json::Value, ApiError> {
        let url = format!("{}{}", self.config.base_url, path);
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                let delay = self.config.retry_base_delay * 2u32.pow(attempt - 1);
                debug!(attempt, delay_ms = delay.as_millis(), "Retrying request");
                sleep(delay).await;
            }

            // Global spacing applies to every attempt, retries included.
            self.limiter.until_ready().await;

            let mut request = self
                .http
                .request(method.clone(), &url)
                .header("accept", "application/json")
                .header("X-API-Key", &self.credentials.api_key);
            if let Some(json) = body {
                request = request.json(json);
            }

            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status == StatusCode::TOO_MANY_REQUESTS {
                        warn!("Rate limited by exchange, backing off");
                        last_error = Some(ApiError::Http {
                            status,
                            body: String::new(),
                        });
                        continue;
                    }
                    if status.is_server_error() {
                        warn!(status = %status, "Server error, retrying");
                        last_error = Some(ApiError::Http {
                            status,
                            body: String::new(),
                        });
                        continue;
                    }
                    let text = response.text().await.map_err(ApiError::Network)?;
                    if !status.is_success() {
                        return Err(ApiError::Http { status, body: text });
                    }
                    if text.trim().is_empty() {
                        return Ok(serde_json::Value::Null);
                    }
                    return serde_json::from_str(&text).map_err(ApiError::Decode);
                }
                Err(e) => {
                    warn!(error = %e, attempt, "Request failed");
                    last_error = Some(ApiError::Network(e));
                    continue;
                }
            }
        }

        Err(last_error.unwrap_or(ApiError::RetriesExhausted))
    }
}
