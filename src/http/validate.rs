//! Response validation
//!
//! Two independent checks:
//! - [`ResponseCheck`] classifies the HTTP status of a response per request kind
//! - [`check_json_for_error`] looks for an `error` object embedded in a body,
//!   which the Core API sometimes returns with a 200 status

use super::transport::ApiResponse;
use crate::error::{Error, Result};
use crate::types::{JsonValue, Method};
use tracing::warn;

/// Status expectations for one request kind.
///
/// GET succeeds only on 200 and POST only on 204. PUT and DELETE have no
/// single agreed status, so callers name the accepted codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseCheck {
    method: Method,
    success: Vec<u16>,
    ignore_exceptions: bool,
}

impl ResponseCheck {
    pub fn get() -> Self {
        Self::new(Method::GET, &[200])
    }

    pub fn post() -> Self {
        Self::new(Method::POST, &[204])
    }

    pub fn put(success: &[u16]) -> Self {
        Self::new(Method::PUT, success)
    }

    pub fn delete(success: &[u16]) -> Self {
        Self::new(Method::DELETE, success)
    }

    fn new(method: Method, success: &[u16]) -> Self {
        Self {
            method,
            success: success.to_vec(),
            ignore_exceptions: false,
        }
    }

    /// Report failures as diagnostics instead of errors
    #[must_use]
    pub fn ignore_exceptions(mut self, ignore: bool) -> Self {
        self.ignore_exceptions = ignore;
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn is_success(&self, status: u16) -> bool {
        self.success.contains(&status)
    }

    /// Validate a response; see [`check_api_response`]
    pub fn check(&self, response: &ApiResponse) -> Result<bool> {
        check_api_response(response, self)
    }
}

/// Decide whether a response succeeded.
///
/// Returns `Ok(true)` on success. On failure either returns `Ok(false)` after
/// a warning (when ignoring exceptions) or the typed error for the request
/// kind, with `BadCredentials` taking precedence for 401.
pub fn check_api_response(response: &ApiResponse, check: &ResponseCheck) -> Result<bool> {
    let status = response.status();
    if check.is_success(status) {
        return Ok(true);
    }

    let message = format!(
        "The API request returned a {} status code with the following message: {}",
        status,
        response.text()
    );
    if check.ignore_exceptions {
        warn!("{}", message);
        return Ok(false);
    }

    Err(status_error(check.method, status, message, response.text()))
}

fn status_error(method: Method, status: u16, message: String, body: &str) -> Error {
    if status == 401 {
        return Error::BadCredentials {
            body: body.to_string(),
        };
    }
    match method {
        Method::GET => Error::GetRequest { status, message },
        Method::POST => Error::PostRequest { status, message },
        Method::PUT => Error::PutRequest { status, message },
        Method::DELETE => Error::DeleteRequest { status, message },
    }
}

/// Inspect a parsed body for an embedded `error.status`.
///
/// A 404 becomes `NotFound` for `subject`; any other status becomes a
/// generic `Request` error. Bodies without `error.status` pass. The body is
/// only read, so repeated checks give the same answer.
pub fn check_json_for_error(json: &JsonValue, subject: &str) -> Result<()> {
    let Some(error) = json.get("error") else {
        return Ok(());
    };
    let Some(status) = error.get("status").and_then(status_code) else {
        return Ok(());
    };
    let message = error
        .get("message")
        .and_then(JsonValue::as_str)
        .unwrap_or_default()
        .to_string();

    if status == 404 {
        Err(Error::NotFound {
            subject: subject.to_string(),
            message,
        })
    } else {
        Err(Error::Request {
            subject: subject.to_string(),
            status,
            message,
        })
    }
}

/// [`check_json_for_error`] with the `ignore_exceptions` escape hatch.
///
/// Returns `Ok(false)` after a warning instead of an error when ignoring.
pub fn check_json_body(json: &JsonValue, subject: &str, ignore_exceptions: bool) -> Result<bool> {
    match check_json_for_error(json, subject) {
        Ok(()) => Ok(true),
        Err(e) if ignore_exceptions => {
            warn!("{}", e);
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

fn status_code(value: &JsonValue) -> Option<u16> {
    match value {
        JsonValue::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
