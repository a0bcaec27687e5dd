//! Core API callers
//!
//! [`CoreApi`] owns an [`HttpClient`](crate::http::HttpClient) and exposes
//! the single-entity lookup, platform information and the per-entity
//! helpers. Each entity area lives in its own file as another `impl CoreApi`
//! block; the helpers only supply a query and a dataset to the core.

mod content;
mod core;
mod groups;
mod news;
mod places;
mod users;

pub use self::core::{resolve_lookup_type, ApiInfoFilter, CoreApi};
pub use content::ContentType;
pub use groups::GroupRole;
pub use users::{parse_user_fields, validate_timestamp, DEFAULT_TIMESTAMP};

use crate::types::JsonValue;

/// Render an ID that may arrive as a JSON string or number
pub(crate) fn id_string(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
