//! Connection state
//!
//! A [`Connection`] is the resolved Core API root plus the Basic auth
//! credentials. It is built once through [`Connection::connect`] and then
//! shared read-only (usually behind an `Arc`) by every client component.

use crate::config::HelperConfig;
use crate::error::{Error, Result};
use crate::types::{CoreApiVersion, JsonValue};
use std::fmt;
use tracing::debug;

/// Protocol prefix used when a bare domain is supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Protocol {
    Http,
    #[default]
    Https,
}

impl Protocol {
    fn prefix(self) -> &'static str {
        match self {
            Protocol::Http => "http://",
            Protocol::Https => "https://",
        }
    }
}

/// Username and password for HTTP Basic authentication
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Create credentials, rejecting an empty username or password
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let username = username.into();
        let password = password.into();
        if username.is_empty() || password.is_empty() {
            return Err(Error::IncompleteCredentials);
        }
        Ok(Self { username, password })
    }

    /// Validate credentials supplied as loosely-typed values (e.g. from a
    /// config file or another language binding).
    pub fn from_values(values: &[JsonValue]) -> Result<Self> {
        match values {
            [] => Err(Error::IncompleteCredentials),
            [_] => Err(Error::IncompleteCredentials),
            [user, pass] => match (user.as_str(), pass.as_str()) {
                (Some(user), Some(pass)) => Self::new(user, pass),
                _ => Err(Error::WrongCredentialType),
            },
            other => Err(Error::CredentialsUnpacking { count: other.len() }),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

/// Build the Core API root for a domain.
///
/// `community.example.com` becomes `https://community.example.com/api/core/v3`.
pub fn resolve_base_url(domain: &str, version: CoreApiVersion, protocol: Protocol) -> String {
    let domain = domain.trim();
    let with_scheme = if domain.starts_with("http://") || domain.starts_with("https://") {
        domain.to_string()
    } else {
        format!("{}{}", protocol.prefix(), domain)
    };
    let trimmed = with_scheme.trim_end_matches('/');
    if trimmed.contains("/api/core/v") {
        trimmed.to_string()
    } else {
        format!("{}{}", trimmed, version.api_path())
    }
}

/// Immutable connection handle
#[derive(Debug, Clone)]
pub struct Connection {
    base_url: String,
    credentials: Credentials,
}

impl Connection {
    /// Establish the connection information for Core API queries.
    ///
    /// `base_url` may be a bare domain, a platform URL or a full
    /// `/api/core/vN` root. Nothing is sent over the network here.
    pub fn connect(base_url: &str, credentials: Credentials) -> Result<Self> {
        Self::connect_with(base_url, credentials, CoreApiVersion::V3, Protocol::Https)
    }

    /// Like [`Connection::connect`] with an explicit API version and protocol
    pub fn connect_with(
        base_url: &str,
        credentials: Credentials,
        version: CoreApiVersion,
        protocol: Protocol,
    ) -> Result<Self> {
        if base_url.trim().is_empty() {
            return Err(Error::NoCredentials);
        }
        let base_url = resolve_base_url(base_url, version, protocol);
        url::Url::parse(&base_url)?;
        debug!("Connected to {}", base_url);
        Ok(Self {
            base_url,
            credentials,
        })
    }

    /// Build a connection from a parsed helper file
    pub fn from_helper(helper: &HelperConfig) -> Result<Self> {
        let credentials = Credentials::new(
            helper.connection.credentials.username.clone(),
            helper.connection.credentials.password.clone(),
        )?;
        Self::connect(&helper.connection.base_url, credentials)
    }

    /// Core API root, e.g. `https://host/api/core/v3`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Platform URL without the trailing `/api/core/vN` path
    pub fn platform_url(&self) -> &str {
        match self.base_url.rfind("/api/core/") {
            Some(idx) => &self.base_url[..idx],
            None => &self.base_url,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}
