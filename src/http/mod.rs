//! HTTP module
//!
//! Request execution against the Core API.
//!
//! # Features
//!
//! - **Transport seam**: one-shot exchanges behind the [`Transport`] trait
//! - **Retries**: transport failures retried with backoff, then `ConnectionFailure`
//! - **Validation**: per-method status checks and embedded JSON error detection
//! - **Throttling**: optional token bucket using governor

mod client;
mod throttle;
mod transport;
mod validate;

pub use client::{serialize_payload, HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use throttle::{RequestThrottle, ThrottleConfig};
pub use transport::{
    ApiResponse, HttpRequest, ReqwestTransport, Transport, TransportError, TransportErrorKind,
};
pub use validate::{check_api_response, check_json_body, check_json_for_error, ResponseCheck};
