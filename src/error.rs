//! Error types for the Khoros JX client
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for the Khoros JX client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Connection / Configuration Errors
    // ============================================================================
    #[error("The base URL and API credentials have not yet been defined; call connect() first")]
    NoCredentials,

    #[error("The API credentials are missing a username or password")]
    IncompleteCredentials,

    #[error("The API credentials must contain exactly a username and a password (got {count} values)")]
    CredentialsUnpacking { count: usize },

    #[error("The API username and password must both be strings")]
    WrongCredentialType,

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("The {method} request was unable to complete after {attempts} attempts: {message}")]
    ConnectionFailure {
        method: String,
        attempts: u32,
        message: String,
    },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    // ============================================================================
    // Protocol / Response Errors
    // ============================================================================
    #[error("The API rejected the supplied credentials (401): {body}")]
    BadCredentials { body: String },

    #[error("GET request failed: {message}")]
    GetRequest { status: u16, message: String },

    #[error("POST request failed: {message}")]
    PostRequest { status: u16, message: String },

    #[error("PUT request failed: {message}")]
    PutRequest { status: u16, message: String },

    #[error("DELETE request failed: {message}")]
    DeleteRequest { status: u16, message: String },

    // ============================================================================
    // Embedded Business Errors
    // ============================================================================
    #[error("The queried {subject} could not be found: {message}")]
    NotFound { subject: String, message: String },

    #[error("The API returned an error for the {subject} query (status {status}): {message}")]
    Request {
        subject: String,
        status: u16,
        message: String,
    },

    #[error("Unable to locate content for '{lookup}'")]
    ContentNotFound { lookup: String },

    // ============================================================================
    // Schema / Lookup Errors
    // ============================================================================
    #[error("The supplied value '{name}' is not a valid dataset")]
    InvalidDataset { name: String },

    #[error("Unable to identify a dataset for the query URI '{uri}'")]
    DatasetNotFound { uri: String },

    #[error("Invalid lookup type: {message}")]
    InvalidLookupType { message: String },

    #[error("Lookup mismatch: {message}")]
    LookupMismatch { message: String },

    #[error("The endpoint '{name}' is not a recognized Core API endpoint")]
    InvalidEndpoint { name: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid lookup type error
    pub fn invalid_lookup(message: impl Into<String>) -> Self {
        Self::InvalidLookupType {
            message: message.into(),
        }
    }

    /// Create a lookup mismatch error
    pub fn lookup_mismatch(message: impl Into<String>) -> Self {
        Self::LookupMismatch {
            message: message.into(),
        }
    }

    /// Create an invalid dataset error
    pub fn invalid_dataset(name: impl Into<String>) -> Self {
        Self::InvalidDataset { name: name.into() }
    }

    /// HTTP status attached to a protocol or embedded error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::BadCredentials { .. } => Some(401),
            Error::GetRequest { status, .. }
            | Error::PostRequest { status, .. }
            | Error::PutRequest { status, .. }
            | Error::DeleteRequest { status, .. }
            | Error::Request { status, .. } => Some(*status),
            Error::NotFound { .. } => Some(404),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether an `ignore_exceptions` flag may downgrade this error to a diagnostic.
    ///
    /// Schema mistakes are programmer errors and always propagate.
    pub fn is_suppressible(&self) -> bool {
        !matches!(
            self,
            Error::InvalidDataset { .. }
                | Error::DatasetNotFound { .. }
                | Error::NoCredentials
                | Error::IncompleteCredentials
                | Error::CredentialsUnpacking { .. }
                | Error::WrongCredentialType
        )
    }
}

/// Result type alias for the Khoros JX client
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
