//! Single-entity lookups and platform information

use crate::connection::Connection;
use crate::error::{Error, Result};
use crate::http::{
    check_json_body, check_json_for_error, HttpClient, HttpClientConfig, ResponseCheck,
};
use crate::pagination::{get_paginated, PaginatedQuery};
use crate::query::{append_query, build_query_url, Endpoint, LookupType};
use crate::types::{CoreApiVersion, JsonObject, JsonValue};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::warn;

/// Subset of the `/api/version` document to return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiInfoFilter {
    #[default]
    None,
    Platform,
    V2,
    V3,
    Sso,
    Edition,
    Environment,
    Tier,
}

impl ApiInfoFilter {
    fn select(self, info: &JsonValue) -> Option<&JsonValue> {
        match self {
            ApiInfoFilter::None => Some(info),
            ApiInfoFilter::Platform => info.get("jiveVersion"),
            ApiInfoFilter::V2 => info.get("jiveCoreVersions").and_then(|v| v.get(0)),
            ApiInfoFilter::V3 => info.get("jiveCoreVersions").and_then(|v| v.get(1)),
            ApiInfoFilter::Sso => info.get("ssoEnabled"),
            ApiInfoFilter::Edition => info.get("jiveEdition"),
            ApiInfoFilter::Environment => info.get("jiveEdition").and_then(|e| e.get("product")),
            ApiInfoFilter::Tier => info.get("jiveEdition").and_then(|e| e.get("tier")),
        }
    }
}

impl From<CoreApiVersion> for ApiInfoFilter {
    fn from(version: CoreApiVersion) -> Self {
        match version {
            CoreApiVersion::V2 => ApiInfoFilter::V2,
            CoreApiVersion::V3 => ApiInfoFilter::V3,
        }
    }
}

impl FromStr for ApiInfoFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "" => Ok(ApiInfoFilter::None),
            "platform" => Ok(ApiInfoFilter::Platform),
            "v2" => Ok(ApiInfoFilter::V2),
            "v3" => Ok(ApiInfoFilter::V3),
            "sso" => Ok(ApiInfoFilter::Sso),
            "edition" => Ok(ApiInfoFilter::Edition),
            "environment" => Ok(ApiInfoFilter::Environment),
            "tier" => Ok(ApiInfoFilter::Tier),
            other => Err(Error::config(format!(
                "'{other}' is not a valid API information filter"
            ))),
        }
    }
}

impl fmt::Display for ApiInfoFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ApiInfoFilter::None => "none",
            ApiInfoFilter::Platform => "platform",
            ApiInfoFilter::V2 => "v2",
            ApiInfoFilter::V3 => "v3",
            ApiInfoFilter::Sso => "sso",
            ApiInfoFilter::Edition => "edition",
            ApiInfoFilter::Environment => "environment",
            ApiInfoFilter::Tier => "tier",
        };
        f.write_str(name)
    }
}

/// Parse a lookup type name.
///
/// An unknown name is `InvalidLookupType`, or `Id` after a warning when
/// ignoring exceptions.
pub fn resolve_lookup_type(identifier: &str, ignore_exceptions: bool) -> Result<LookupType> {
    match identifier.parse::<LookupType>() {
        Ok(lookup) => Ok(lookup),
        Err(e) if ignore_exceptions => {
            warn!("{} The lookup will use the default 'id' identifier.", e);
            Ok(LookupType::Id)
        }
        Err(e) => Err(e),
    }
}

/// Entry point for Core API calls
#[derive(Debug, Clone)]
pub struct CoreApi {
    client: HttpClient,
}

impl CoreApi {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Build an API handle over a reqwest client with default settings
    pub fn connect(connection: Connection) -> Result<Self> {
        Self::with_config(connection, HttpClientConfig::default())
    }

    pub fn with_config(connection: Connection, config: HttpClientConfig) -> Result<Self> {
        Ok(Self::new(HttpClient::with_config(
            Arc::new(connection),
            config,
        )?))
    }

    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    pub fn connection(&self) -> &Connection {
        self.client.connection()
    }

    /// `{base_url}/{segments...}`
    pub fn query_url<I>(&self, segments: I) -> String
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        build_query_url(self.connection().base_url(), segments)
    }

    /// GET a URL and parse the body, failing on any status but 200 or on an
    /// embedded `error` document about `subject`
    pub(crate) async fn get_checked_json(&self, url: &str, subject: &str) -> Result<JsonValue> {
        let response = self.client.get_with_retries(url, true).await?;
        ResponseCheck::get().check(&response)?;
        let body = response.json()?;
        check_json_for_error(&body, subject)?;
        Ok(body)
    }

    /// GET a single entity. Both the status and any embedded `error` are
    /// checked; `None` means a failure was ignored.
    pub(crate) async fn get_entity(
        &self,
        url: &str,
        subject: &str,
        ignore_exceptions: bool,
    ) -> Result<Option<JsonValue>> {
        let response = self.client.get_with_retries(url, true).await?;
        let check = ResponseCheck::get().ignore_exceptions(ignore_exceptions);
        if !check.check(&response)? {
            return Ok(None);
        }

        let body = response.json()?;
        if check_json_body(&body, subject, ignore_exceptions)? {
            Ok(Some(body))
        } else {
            Ok(None)
        }
    }

    /// Retrieve one entity from `endpoint`.
    ///
    /// `Email` and `Username` lookups are only accepted by the people
    /// endpoint. A 200 carrying an embedded `error` fails like a bad status.
    /// With `ignore_exceptions`, either failure gives an empty object after a
    /// warning.
    pub async fn get_data(
        &self,
        endpoint: Endpoint,
        lookup_value: &str,
        lookup: LookupType,
        all_fields: bool,
        ignore_exceptions: bool,
    ) -> Result<JsonValue> {
        if lookup != LookupType::Id && endpoint != Endpoint::People {
            return Err(Error::invalid_lookup(format!(
                "The identifier '{}' is only accepted with the people endpoint.",
                lookup.path_segment().unwrap_or("id")
            )));
        }

        let mut segments = vec![endpoint.as_str()];
        segments.extend(lookup.path_segment());
        segments.push(lookup_value);
        let mut url = self.query_url(segments);
        if all_fields {
            url = append_query(&url, "fields=@all");
        }

        Ok(self
            .get_entity(&url, endpoint.as_str(), ignore_exceptions)
            .await?
            .unwrap_or_else(|| JsonValue::Object(JsonObject::new())))
    }

    /// Version information from `{platform}/api/version`.
    ///
    /// A filter whose key is absent yields an empty object.
    pub async fn get_api_info(&self, filter: ApiInfoFilter) -> Result<JsonValue> {
        let url = format!("{}/api/version", self.connection().platform_url());
        let info = self.get_checked_json(&url, "version information").await?;
        Ok(filter
            .select(&info)
            .cloned()
            .unwrap_or_else(|| JsonValue::Object(JsonObject::new())))
    }

    /// Core API version as `major.minor`, e.g. `3.15`
    pub async fn get_api_version(&self, version: CoreApiVersion) -> Result<String> {
        let info = self.get_api_info(version.into()).await?;
        match (info.get("version"), info.get("revision")) {
            (Some(major), Some(minor)) => Ok(format!(
                "{}.{}",
                scalar_string(major),
                scalar_string(minor)
            )),
            _ => Err(Error::NotFound {
                subject: "API version".to_string(),
                message: format!("no {} entry in the version information", version.as_str()),
            }),
        }
    }

    /// Platform release, e.g. `2018.22.0.0_jx`
    pub async fn get_platform_version(&self) -> Result<String> {
        let info = self.get_api_info(ApiInfoFilter::Platform).await?;
        info.as_str().map(ToString::to_string).ok_or_else(|| Error::NotFound {
            subject: "platform version".to_string(),
            message: "no jiveVersion in the version information".to_string(),
        })
    }

    /// Collect every record of a paginated query
    pub async fn get_paginated(&self, query: PaginatedQuery) -> Result<Vec<JsonObject>> {
        get_paginated(&self.client, query).await
    }
}

fn scalar_string(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}
