//! Transport layer
//!
//! A [`Transport`] performs exactly one HTTP exchange. It never retries and
//! never interprets status codes; a non-2xx response is still `Ok`. Only
//! failures below HTTP (timeouts, refused or reset connections, truncated
//! bodies) surface as [`TransportError`].

use crate::connection::Credentials;
use crate::error::{Error, Result};
use crate::types::Method;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// A fully-formed request handed to the transport
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    /// Serialized JSON payload (POST/PUT only)
    pub body: Option<String>,
    /// Verify TLS certificates
    pub verify_ssl: bool,
    pub credentials: Credentials,
}

/// Status, headers and body of a completed exchange
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: u16,
    headers: HeaderMap,
    body: String,
}

impl ApiResponse {
    pub fn new(status: u16, headers: HeaderMap, body: impl Into<String>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Shorthand for a JSON body with no headers
    pub fn from_json(status: u16, body: &serde_json::Value) -> Self {
        Self::new(status, HeaderMap::new(), body.to_string())
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn text(&self) -> &str {
        &self.body
    }

    /// Deserialize the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(Error::from)
    }
}

/// Coarse classification of a transport failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Timeout,
    Connect,
    Body,
    Other,
}

/// A failure below the HTTP layer
#[derive(Debug, Clone, thiserror::Error)]
#[error("{kind:?}: {message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        let kind = if e.is_timeout() {
            TransportErrorKind::Timeout
        } else if e.is_connect() {
            TransportErrorKind::Connect
        } else if e.is_body() || e.is_decode() {
            TransportErrorKind::Body
        } else {
            TransportErrorKind::Other
        };
        Self::new(kind, e.to_string())
    }
}

/// One-shot HTTP exchange
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &HttpRequest) -> std::result::Result<ApiResponse, TransportError>;
}

/// `reqwest`-backed transport
///
/// Keeps two pooled clients: one verifying certificates and one that
/// accepts invalid certificates for `verify_ssl = false`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    strict: Client,
    insecure: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let strict = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        let insecure = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .danger_accept_invalid_certs(true)
            .build()?;
        Ok(Self { strict, insecure })
    }

    fn client(&self, verify_ssl: bool) -> &Client {
        if verify_ssl {
            &self.strict
        } else {
            &self.insecure
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> std::result::Result<ApiResponse, TransportError> {
        let mut req = self
            .client(request.verify_ssl)
            .request(request.method.into(), &request.url)
            .basic_auth(
                request.credentials.username(),
                Some(request.credentials.password()),
            );

        if let Some(body) = &request.body {
            req = req
                .header(CONTENT_TYPE, "application/json")
                .header(ACCEPT, "application/json")
                .body(body.clone());
        }

        let response = req.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.text().await?;

        Ok(ApiResponse::new(status, headers, body))
    }
}
