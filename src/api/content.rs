//! Content helpers

use super::core::CoreApi;
use super::id_string;
use crate::dataset::{identify_dataset, Dataset};
use crate::error::{Error, Result};
use crate::pagination::PaginatedQuery;
use crate::types::JsonObject;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static DOCUMENT_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"DOC-(\d+)").unwrap());

/// Content kinds addressable by URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentType {
    BlogPost,
    Discussion,
    #[default]
    Document,
    Event,
    Idea,
    Question,
    Thread,
    Video,
}

impl ContentType {
    /// `entityDescriptor` object type
    pub fn type_id(self) -> u64 {
        match self {
            ContentType::BlogPost => 38,
            ContentType::Discussion | ContentType::Question | ContentType::Thread => 1,
            ContentType::Document => 102,
            ContentType::Event => 96_891_546,
            ContentType::Idea => 3_227_383,
            ContentType::Video => 1100,
        }
    }

    /// Path marker that follows the platform URL in a content URL
    pub fn url_delimiter(self) -> &'static str {
        match self {
            ContentType::BlogPost => "/community",
            ContentType::Discussion | ContentType::Question | ContentType::Thread => "/thread",
            ContentType::Document => "/docs",
            ContentType::Event => "/events",
            ContentType::Idea => "/ideas",
            ContentType::Video => "/videos",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::BlogPost => "blog post",
            ContentType::Discussion => "discussion",
            ContentType::Document => "document",
            ContentType::Event => "event",
            ContentType::Idea => "idea",
            ContentType::Question => "question",
            ContentType::Thread => "thread",
            ContentType::Video => "video",
        }
    }

    /// Item ID embedded in a content URL
    fn item_id(self, url: &str) -> Result<String> {
        match self {
            ContentType::BlogPost => Err(Error::invalid_lookup(
                "Content ID lookup does not currently support blog posts",
            )),
            ContentType::Document => DOCUMENT_ID
                .captures(url)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
                .ok_or_else(|| {
                    Error::lookup_mismatch(format!("'{url}' is not a document URL (no DOC- ID)"))
                }),
            _ => url
                .trim_end_matches('/')
                .rsplit('/')
                .next()
                .filter(|id| !id.is_empty())
                .map(ToString::to_string)
                .ok_or_else(|| Error::lookup_mismatch(format!("'{url}' has no item ID"))),
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace(['_', '-'], " ").as_str() {
            "blog post" => Ok(ContentType::BlogPost),
            "discussion" => Ok(ContentType::Discussion),
            "document" => Ok(ContentType::Document),
            "event" => Ok(ContentType::Event),
            "idea" => Ok(ContentType::Idea),
            "question" => Ok(ContentType::Question),
            "thread" => Ok(ContentType::Thread),
            "video" => Ok(ContentType::Video),
            other => Err(Error::invalid_lookup(format!(
                "The content type '{other}' is unrecognized"
            ))),
        }
    }
}

/// Platform URL in front of the content type's path marker
fn platform_url(url: &str, content_type: ContentType) -> String {
    let platform = url
        .split(content_type.url_delimiter())
        .next()
        .unwrap_or(url)
        .trim_end_matches('/');
    if platform.starts_with("http") {
        platform.to_string()
    } else {
        format!("https://{platform}")
    }
}

impl CoreApi {
    /// Content ID for a content URL
    pub async fn get_content_id(&self, url: &str, content_type: ContentType) -> Result<String> {
        let item_id = content_type.item_id(url)?;
        let query_url = format!(
            "{}/api/core/v3/contents?filter=entityDescriptor({},{})&count=1",
            platform_url(url, content_type),
            content_type.type_id(),
            item_id
        );

        let body = self.get_checked_json(&query_url, "content").await?;
        body.get("list")
            .and_then(|list| list.get(0))
            .and_then(|item| item.get("contentID"))
            .and_then(id_string)
            .ok_or_else(|| Error::ContentNotFound {
                lookup: url.to_string(),
            })
    }

    /// Collect content from `endpoint` (e.g. `securityGroups` or
    /// `people/email/a@b.c`) with extra query parameters.
    ///
    /// Without a known `dataset`, one is identified from the query URL.
    pub async fn get_paginated_content(
        &self,
        endpoint: &str,
        query_string: &str,
        dataset: Option<&str>,
        all_fields: bool,
        return_fields: Option<&[String]>,
        ignore_exceptions: bool,
    ) -> Result<Vec<JsonObject>> {
        let url = self.query_url([endpoint.replace('?', "")]);
        let dataset = match dataset.map(str::parse::<Dataset>) {
            Some(Ok(dataset)) => dataset,
            _ => identify_dataset(&url)?,
        };

        let query = PaginatedQuery::new(url, dataset.as_str())
            .all_fields(all_fields)
            .extra_query(query_string.replace('?', ""))
            .return_fields(return_fields.unwrap_or_default().iter().cloned())
            .ignore_exceptions(ignore_exceptions);
        self.get_paginated(query).await
    }
}
