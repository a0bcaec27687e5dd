//! Endpoint and URL builder
//!
//! Composes Core API query URLs from a base URL, path segments and query
//! fragments without doubling slashes or separators.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Join `segments` onto `base`, each prefixed with exactly one `/`.
///
/// ```
/// use khoros_jx::query::build_query_url;
///
/// let url = build_query_url("https://x/api/core/v3/", ["places", "42", "contents"]);
/// assert_eq!(url, "https://x/api/core/v3/places/42/contents");
/// ```
pub fn build_query_url<I>(base: &str, segments: I) -> String
where
    I: IntoIterator,
    I::Item: fmt::Display,
{
    let mut url = base.trim_end_matches('/').to_string();
    for segment in segments {
        let segment = segment.to_string();
        let segment = segment.trim_matches('/');
        if segment.is_empty() {
            continue;
        }
        url.push('/');
        url.push_str(segment);
    }
    url
}

/// Append a query fragment, choosing `?` or `&` from what the URL already has
pub fn append_query(url: &str, fragment: &str) -> String {
    let fragment = fragment.trim_start_matches(['?', '&']);
    if fragment.is_empty() {
        return url.to_string();
    }
    if url.ends_with('?') || url.ends_with('&') {
        format!("{url}{fragment}")
    } else if url.contains('?') {
        format!("{url}&{fragment}")
    } else {
        format!("{url}?{fragment}")
    }
}

/// The URL with any query string removed
pub fn strip_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(path, _)| path)
}

/// One `filter=element(criteria)` clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterClause {
    pub element: String,
    pub criteria: String,
}

impl FilterClause {
    pub fn new(element: impl Into<String>, criteria: impl Into<String>) -> Self {
        Self {
            element: element.into(),
            criteria: criteria.into(),
        }
    }
}

impl fmt::Display for FilterClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "filter={}({})", self.element, self.criteria)
    }
}

/// Parses `element=criteria`
impl FromStr for FilterClause {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('=') {
            Some((element, criteria)) if !element.trim().is_empty() => {
                Ok(Self::new(element.trim(), criteria.trim()))
            }
            _ => Err(Error::Other(format!(
                "Filters must be supplied as element=criteria (got '{s}')"
            ))),
        }
    }
}

impl<E: Into<String>, C: Into<String>> From<(E, C)> for FilterClause {
    fn from((element, criteria): (E, C)) -> Self {
        Self::new(element, criteria)
    }
}

/// Render filter clauses joined by `&`, with a leading `&` when `leading` is set.
///
/// Returns an empty string when there are no filters.
pub fn filter_syntax(filters: &[FilterClause], leading: bool) -> String {
    if filters.is_empty() {
        return String::new();
    }
    let joined = filters
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("&");
    if leading {
        format!("&{joined}")
    } else {
        joined
    }
}

macro_rules! endpoints {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// Top-level Core API v3 endpoints
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Endpoint {
            $($variant),+
        }

        impl Endpoint {
            /// Every endpoint, in catalogue order
            pub const ALL: &'static [Endpoint] = &[$(Endpoint::$variant),+];

            /// Path segment used in URLs
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Endpoint::$variant => $name),+
                }
            }
        }

        impl FromStr for Endpoint {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                match s.trim_matches('/') {
                    $($name => Ok(Endpoint::$variant),)+
                    other => Err(Error::InvalidEndpoint { name: other.to_string() }),
                }
            }
        }
    };
}

endpoints! {
    AbuseReports => "abuseReports",
    Acclaim => "acclaim",
    Actions => "actions",
    Activities => "activities",
    AddOns => "addOns",
    Announcements => "announcements",
    Attachments => "attachments",
    Calendar => "calendar",
    Checkpoints => "checkpoints",
    Collaborations => "collaborations",
    Comments => "comments",
    Contents => "contents",
    DeletedObjects => "deletedObjects",
    Dms => "dms",
    Events => "events",
    EventTypes => "eventTypes",
    ExecuteBatch => "executeBatch",
    Extprops => "extprops",
    ExtstreamDefs => "extstreamDefs",
    Extstreams => "extstreams",
    IdeaVotes => "ideaVotes",
    Images => "images",
    Inbox => "inbox",
    Invites => "invites",
    Members => "members",
    Mentions => "mentions",
    Messages => "messages",
    Moderation => "moderation",
    Oembed => "oembed",
    Outcomes => "outcomes",
    Pages => "pages",
    People => "people",
    Places => "places",
    PlaceTemplateCategories => "placeTemplateCategories",
    PlaceTemplates => "placeTemplates",
    PlaceTopics => "placeTopics",
    ProfileImages => "profileImages",
    Publications => "publications",
    Questions => "questions",
    Rsvp => "rsvp",
    Search => "search",
    Sections => "sections",
    SecurityGroups => "securityGroups",
    Shares => "shares",
    Slides => "slides",
    Stages => "stages",
    Statics => "statics",
    StreamEntries => "streamEntries",
    Streams => "streams",
    Tags => "tags",
    TileDefs => "tileDefs",
    Tiles => "tiles",
    Urls => "urls",
    Versions => "versions",
    Videos => "videos",
    Vitals => "vitals",
    Votes => "votes",
    Webhooks => "webhooks",
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a single-entity lookup value is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupType {
    #[default]
    Id,
    Email,
    Username,
}

impl LookupType {
    /// Extra path segment placed before the lookup value
    pub fn path_segment(self) -> Option<&'static str> {
        match self {
            LookupType::Id => None,
            LookupType::Email => Some("email"),
            LookupType::Username => Some("username"),
        }
    }
}

impl FromStr for LookupType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "id" => Ok(LookupType::Id),
            "email" => Ok(LookupType::Email),
            "username" => Ok(LookupType::Username),
            other => Err(Error::invalid_lookup(format!(
                "'{other}' is not a valid lookup type (expected id, email or username)"
            ))),
        }
    }
}
