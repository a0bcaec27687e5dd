//! People helpers and user record normalization

use super::core::CoreApi;
use super::id_string;
use crate::dataset::{resolve_path, PathStep};
use crate::error::{Error, Result};
use crate::pagination::{PaginatedCollector, PaginatedQuery};
use crate::query::{Endpoint, LookupType};
use crate::types::{JsonObject, JsonValue};
use chrono::NaiveDateTime;
use tracing::warn;

/// Replacement for first/last login timestamps that fail validation
pub const DEFAULT_TIMESTAMP: &str = "2016-01-01T01:01:01";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

use PathStep::{Index, Key};

const USER_COLUMNS: &[(&str, &[PathStep])] = &[
    ("user_jive_id", &[Key("id")]),
    ("user_full_name", &[Key("name"), Key("formatted")]),
    ("user_email", &[Key("emails"), Index(0), Key("value")]),
    ("user_username", &[Key("jive"), Key("username")]),
    ("user_enabled", &[Key("jive"), Key("enabled")]),
    ("user_federated", &[Key("jive"), Key("federated")]),
    (
        "user_external_id",
        &[Key("jive"), Key("externalIdentities"), Index(0), Key("identity")],
    ),
    ("user_first_login", &[Key("initialLogin")]),
    ("user_last_login", &[Key("jive"), Key("lastAuthenticated")]),
    ("user_agm_level", &[Key("jive"), Key("level"), Key("name")]),
    ("user_agm_points", &[Key("jive"), Key("level"), Key("points")]),
    ("user_tags", &[Key("tags")]),
    (
        "user_address_street",
        &[Key("addresses"), Index(0), Key("value"), Key("streetAddress")],
    ),
    (
        "user_address_city",
        &[Key("addresses"), Index(0), Key("value"), Key("locality")],
    ),
    (
        "user_address_state",
        &[Key("addresses"), Index(0), Key("value"), Key("region")],
    ),
    (
        "user_address_zip",
        &[Key("addresses"), Index(0), Key("value"), Key("postalCode")],
    ),
    (
        "user_address_country",
        &[Key("addresses"), Index(0), Key("value"), Key("country")],
    ),
    ("user_locale", &[Key("jive"), Key("locale")]),
];

const PROFILE_PATH: &[PathStep] = &[Key("jive"), Key("profile")];

/// Profile `jive_label` to column
const PROFILE_COLUMNS: &[(&str, &str)] = &[
    ("Company", "user_company"),
    ("Title", "user_job_title"),
    ("Certifications", "user_certifications"),
    ("Department", "user_department"),
    ("Biography", "user_biography"),
    ("Occupation", "user_occupation"),
    ("URL", "user_website"),
    ("Twitter", "user_twitter"),
];

/// Check a `YYYY-MM-DDTHH:MM:SS` timestamp, substituting
/// [`DEFAULT_TIMESTAMP`] when it does not parse.
pub fn validate_timestamp(timestamp: &str) -> String {
    match NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT) {
        Ok(_) => timestamp.to_string(),
        Err(e) => {
            warn!(
                "The timestamp '{}' is invalid ({}) and was replaced with {}",
                timestamp, e, DEFAULT_TIMESTAMP
            );
            DEFAULT_TIMESTAMP.to_string()
        }
    }
}

/// Flatten a people record into `user_*` columns.
///
/// Fields missing from the record are skipped.
pub fn parse_user_fields(json: &JsonValue) -> JsonObject {
    let mut user = JsonObject::new();

    for (column, path) in USER_COLUMNS {
        let Some(value) = resolve_path(json, path) else {
            continue;
        };
        let value = match *column {
            "user_address_street" => match value.as_str() {
                Some(street) => JsonValue::String(street.replace('\n', "")),
                None => continue,
            },
            "user_first_login" | "user_last_login" => match value.as_str() {
                Some(raw) => {
                    let raw: String = raw.chars().take(19).collect();
                    JsonValue::String(validate_timestamp(&raw))
                }
                None => continue,
            },
            "user_tags" => match value.as_array() {
                Some(tags) => JsonValue::String(
                    tags.iter()
                        .filter_map(JsonValue::as_str)
                        .collect::<Vec<_>>()
                        .join(", "),
                ),
                None => continue,
            },
            _ => value.clone(),
        };
        user.insert((*column).to_string(), value);
    }

    if let Some(profile) = resolve_path(json, PROFILE_PATH).and_then(JsonValue::as_array) {
        for entry in profile {
            let label = entry.get("jive_label").and_then(JsonValue::as_str);
            let column = PROFILE_COLUMNS
                .iter()
                .find(|(name, _)| Some(*name) == label)
                .map(|(_, column)| *column);
            if let (Some(column), Some(value)) = (column, entry.get("value")) {
                user.insert(column.to_string(), value.clone());
            }
        }
    }

    user
}

impl CoreApi {
    /// User ID for an email address
    pub async fn get_user_id(&self, email: &str) -> Result<String> {
        if !email.contains('@') {
            return Err(Error::lookup_mismatch(format!(
                "The lookup type is 'email' but '{email}' is not a valid email address."
            )));
        }
        let user = self
            .get_data(Endpoint::People, email, LookupType::Email, false, false)
            .await?;
        required_field(&user, &[Key("id")], "user ID")
    }

    /// Primary email address of a user looked up by ID or username
    pub async fn get_primary_email(&self, lookup_value: &str, lookup: LookupType) -> Result<String> {
        let user = self
            .get_data(Endpoint::People, lookup_value, lookup, false, false)
            .await?;
        required_field(&user, &[Key("emails"), Index(0), Key("value")], "email")
    }

    /// Username of a user looked up by ID or email address
    pub async fn get_username(&self, lookup_value: &str, lookup: LookupType) -> Result<String> {
        let user = self
            .get_data(Endpoint::People, lookup_value, lookup, false, false)
            .await?;
        required_field(&user, &[Key("jive"), Key("username")], "username")
    }

    /// IDs of everyone the user follows
    pub async fn get_people_followed(
        &self,
        user_id: &str,
        ignore_exceptions: bool,
    ) -> Result<Vec<String>> {
        let query = PaginatedQuery::new(self.query_url(["people", user_id, "@following"]), "people")
            .all_fields(false)
            .return_fields(["id"])
            .ignore_exceptions(ignore_exceptions)
            .quiet(true);
        let followed = self.get_paginated(query).await?;
        Ok(followed
            .iter()
            .filter_map(|person| person.get("id").and_then(id_string))
            .collect())
    }

    /// Number of content items authored by a user.
    ///
    /// Counting stops at the first failed page.
    pub async fn get_user_content_count(&self, user_id: &str) -> Result<u64> {
        let author = self.query_url(["people", user_id]);
        let query = PaginatedQuery::new(self.query_url(["contents"]), "document")
            .all_fields(false)
            .filter("author", author)
            .return_fields(["id"])
            .ignore_exceptions(true)
            .quiet(true);
        let (_, state) = PaginatedCollector::new(self.client(), query)?
            .collect_with_state()
            .await?;
        Ok(state.total_fetched)
    }

    /// Most recently logged-in users, one page
    pub async fn get_recent_logins(&self, count: u32, start_index: u64) -> Result<Vec<JsonValue>> {
        let url = format!(
            "{}?sort=lastLoggedIn&fields=jive,emails,name&count={}&startIndex={}",
            self.query_url(["people"]),
            count,
            start_index
        );
        let body = self.get_checked_json(&url, "people").await?;
        Ok(body
            .get("list")
            .and_then(JsonValue::as_array)
            .cloned()
            .unwrap_or_default())
    }
}

fn required_field(json: &JsonValue, path: &[PathStep], what: &str) -> Result<String> {
    resolve_path(json, path)
        .and_then(id_string)
        .ok_or_else(|| Error::NotFound {
            subject: "user".to_string(),
            message: format!("the user record has no {what}"),
        })
}
