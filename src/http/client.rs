//! Retrying request executor
//!
//! Wraps a [`Transport`] with the Core API retry contract:
//! - Transport failures are retried up to `max_retries` times (5 by default)
//!   with a configurable backoff, then surface as `ConnectionFailure`
//! - HTTP status codes are never retried here; see [`super::validate`]
//! - Every attempt is sent with Basic auth from the shared [`Connection`]

use super::throttle::{RequestThrottle, ThrottleConfig};
use super::transport::{ApiResponse, HttpRequest, ReqwestTransport, Transport};
use crate::connection::Connection;
use crate::error::{Error, Result};
use crate::types::{BackoffType, JsonValue, Method};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Per-attempt timeout
    pub timeout: Duration,
    /// Retries after the first failed attempt
    pub max_retries: u32,
    /// Initial delay for backoff; zero disables sleeping
    pub initial_backoff: Duration,
    /// Maximum delay for backoff
    pub max_backoff: Duration,
    /// Type of backoff strategy
    pub backoff_type: BackoffType,
    /// Optional client-side throttle
    pub throttle: Option<ThrottleConfig>,
    /// Retry DELETE requests on transport failure
    pub retry_deletes: bool,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 5,
            initial_backoff: Duration::from_millis(250),
            max_backoff: Duration::from_secs(5),
            backoff_type: BackoffType::Exponential,
            throttle: None,
            retry_deletes: false,
            user_agent: format!("khoros-jx/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the per-attempt timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set max retries
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set backoff configuration
    pub fn backoff(mut self, backoff_type: BackoffType, initial: Duration, max: Duration) -> Self {
        self.config.backoff_type = backoff_type;
        self.config.initial_backoff = initial;
        self.config.max_backoff = max;
        self
    }

    /// Retry immediately, without sleeping between attempts
    pub fn no_backoff(mut self) -> Self {
        self.config.initial_backoff = Duration::ZERO;
        self
    }

    /// Enable client-side throttling
    pub fn throttle(mut self, config: ThrottleConfig) -> Self {
        self.config.throttle = Some(config);
        self
    }

    /// Opt in to retrying DELETE requests
    pub fn retry_deletes(mut self, retry: bool) -> Self {
        self.config.retry_deletes = retry;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// HTTP client bound to one [`Connection`]
#[derive(Clone)]
pub struct HttpClient {
    connection: Arc<Connection>,
    transport: Arc<dyn Transport>,
    config: HttpClientConfig,
    throttle: Option<RequestThrottle>,
}

impl HttpClient {
    /// Create a client with the default configuration
    pub fn new(connection: Arc<Connection>) -> Result<Self> {
        Self::with_config(connection, HttpClientConfig::default())
    }

    /// Create a client backed by reqwest with a custom configuration
    pub fn with_config(connection: Arc<Connection>, config: HttpClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.timeout, &config.user_agent)?;
        Ok(Self::with_transport(connection, config, Arc::new(transport)))
    }

    /// Create a client over an arbitrary transport
    pub fn with_transport(
        connection: Arc<Connection>,
        config: HttpClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let throttle = config.throttle.map(RequestThrottle::new);
        Self {
            connection,
            transport,
            config,
            throttle,
        }
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// GET with retries
    pub async fn get_with_retries(&self, url: &str, verify_ssl: bool) -> Result<ApiResponse> {
        self.send_with_retries(Method::GET, url, None, verify_ssl, self.config.max_retries)
            .await
    }

    /// GET with retries, parsing the body as JSON
    pub async fn get_json(&self, url: &str) -> Result<JsonValue> {
        self.get_with_retries(url, true).await?.json()
    }

    /// POST a JSON payload with retries
    pub async fn post_with_retries<T: Serialize + ?Sized>(
        &self,
        url: &str,
        payload: &T,
        verify_ssl: bool,
    ) -> Result<ApiResponse> {
        let body = serialize_payload(payload)?;
        self.send_with_retries(
            Method::POST,
            url,
            Some(body),
            verify_ssl,
            self.config.max_retries,
        )
        .await
    }

    /// PUT a JSON payload with retries
    pub async fn put_with_retries<T: Serialize + ?Sized>(
        &self,
        url: &str,
        payload: &T,
        verify_ssl: bool,
    ) -> Result<ApiResponse> {
        let body = serialize_payload(payload)?;
        self.send_with_retries(
            Method::PUT,
            url,
            Some(body),
            verify_ssl,
            self.config.max_retries,
        )
        .await
    }

    /// DELETE; a single attempt unless `retry_deletes` is enabled
    pub async fn delete(&self, url: &str, verify_ssl: bool) -> Result<ApiResponse> {
        let retries = if self.config.retry_deletes {
            self.config.max_retries
        } else {
            0
        };
        self.send_with_retries(Method::DELETE, url, None, verify_ssl, retries)
            .await
    }

    async fn send_with_retries(
        &self,
        method: Method,
        url: &str,
        body: Option<String>,
        verify_ssl: bool,
        max_retries: u32,
    ) -> Result<ApiResponse> {
        let request = HttpRequest {
            method,
            url: url.to_string(),
            body,
            verify_ssl,
            credentials: self.connection.credentials().clone(),
        };

        let mut failures: u32 = 0;
        loop {
            if let Some(ref throttle) = self.throttle {
                throttle.wait().await;
            }

            match self.transport.send(&request).await {
                Ok(response) => {
                    debug!(
                        "{} {} -> {} (attempt {})",
                        method,
                        url,
                        response.status(),
                        failures.saturating_add(1)
                    );
                    return Ok(response);
                }
                Err(e) => {
                    warn!(
                        "The {} request failed with the exception below. (Attempt {} of {})\n{}",
                        method,
                        failures.saturating_add(1),
                        max_retries.saturating_add(1),
                        e
                    );
                    failures = failures.saturating_add(1);
                    if failures > max_retries {
                        return Err(Error::ConnectionFailure {
                            method: method.to_string(),
                            attempts: failures,
                            message: format!(
                                "{} consecutive transport failures; last error: {}",
                                failures, e
                            ),
                        });
                    }
                    let delay = self.calculate_backoff(failures - 1);
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }
    }

    /// Calculate backoff delay for a given retry (0-based)
    pub fn calculate_backoff(&self, retry: u32) -> Duration {
        let delay = match self.config.backoff_type {
            BackoffType::Constant => self.config.initial_backoff,
            BackoffType::Linear => self.config.initial_backoff * (retry + 1),
            BackoffType::Exponential => {
                let factor = 2u32.saturating_pow(retry);
                self.config.initial_backoff.saturating_mul(factor)
            }
        };

        std::cmp::min(delay, self.config.max_backoff)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.connection.base_url())
            .field("config", &self.config)
            .field("has_throttle", &self.throttle.is_some())
            .finish_non_exhaustive()
    }
}

/// Serialize a POST/PUT payload.
///
/// Types with a string representation in serde (dates, UUIDs, URLs) go out
/// as their string form.
pub fn serialize_payload<T: Serialize + ?Sized>(payload: &T) -> Result<String> {
    Ok(serde_json::to_string(payload)?)
}
