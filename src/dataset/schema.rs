//! Dataset schemas
//!
//! Static field lists per dataset and the nested paths behind the dotted
//! field names the Core API responses need.

use crate::error::{Error, Result};
use crate::types::JsonValue;
use std::fmt;
use std::str::FromStr;

/// One step into a JSON document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStep {
    Key(&'static str),
    Index(usize),
}

/// Follow `path` into `json`; `None` as soon as a step is absent
pub fn resolve_path<'a>(json: &'a JsonValue, path: &[PathStep]) -> Option<&'a JsonValue> {
    path.iter().try_fold(json, |value, step| match step {
        PathStep::Key(key) => value.get(*key),
        PathStep::Index(idx) => value.get(*idx),
    })
}

use PathStep::{Index, Key};

/// Dotted field names resolved through a nested path when the response has
/// no literal key of that name
static ALIASES: &[(&str, &[PathStep])] = &[
    ("emails.value", &[Key("emails"), Index(0), Key("value")]),
    ("email.value", &[Key("emails"), Index(0), Key("value")]),
    ("name.formatted", &[Key("name"), Key("formatted")]),
    ("jive.lastAuthenticated", &[Key("jive"), Key("lastAuthenticated")]),
    (
        "jive.externalIdentities.identityType",
        &[Key("jive"), Key("externalIdentities"), Index(0), Key("identityType")],
    ),
    (
        "jive.externalIdentities.identity",
        &[Key("jive"), Key("externalIdentities"), Index(0), Key("identity")],
    ),
    ("jive.username", &[Key("jive"), Key("username")]),
    ("jive.status", &[Key("jive"), Key("status")]),
    ("resources.html.ref", &[Key("resources"), Key("html"), Key("ref")]),
    ("author.id", &[Key("author"), Key("id")]),
    ("author.name.formatted", &[Key("author"), Key("name"), Key("formatted")]),
    (
        "author.email.value",
        &[Key("author"), Key("emails"), Index(0), Key("value")],
    ),
    ("content.text", &[Key("content"), Key("text")]),
];

/// Nested path for a well-known dotted field name
pub fn alias_path(field: &str) -> Option<&'static [PathStep]> {
    ALIASES
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, path)| *path)
}

const DOCUMENT_FIELDS: &[&str] = &[
    "id",
    "entityType",
    "followerCount",
    "likeCount",
    "published",
    "tags",
    "updated",
    "contentID",
    "author",
    "content",
    "parent",
    "favoriteCount",
    "replyCount",
    "status",
    "subject",
    "viewCount",
    "visibleToExternalContributors",
    "parentVisible",
    "parentContentVisible",
    "restrictComments",
    "editDisabled",
    "version",
    "attachments",
    "helpfulCount",
    "unhelpfulCount",
    "type",
    "typeCode",
    "lastActivityDate",
];

const IDEA_FIELDS: &[&str] = &[
    "id",
    "subject",
    "followerCount",
    "replyCount",
    "favoriteCount",
    "viewCount",
    "voteCount",
    "commentCount",
    "published",
    "updated",
    "tags",
    "contentID",
    "author.id",
    "author.name.formatted",
    "author.email.value",
    "content.text",
    "parent",
    "status",
    "visibleToExternalContributors",
    "type",
    "typeCode",
    "lastActivityDate",
    "score",
    "stage",
    "authorshipPolicy",
];

const PEOPLE_FIELDS: &[&str] = &[
    "id",
    "followerCount",
    "published",
    "updated",
    "displayName",
    "mentionName",
    "name.formatted",
    "email.value",
    "followingCount",
    "directReportCount",
    "initialLogin",
    "jive.lastAuthenticated",
    "jive.externalIdentities.identityType",
    "jive.externalIdentities.identity",
    "jive.username",
    "jive.status",
];

const PLACE_FIELDS: &[&str] = &[
    "id",
    "followerCount",
    "followed",
    "published",
    "tags",
    "updated",
    "placeID",
    "contentTypes",
    "description",
    "displayName",
    "name",
    "parent",
    "status",
    "viewCount",
    "placeTopics",
    "childCount",
    "visibleToExternalContributors",
    "locale",
    "inheritsAppliedEntitlements",
    "type",
    "typeCode",
    "resources.html.ref",
];

const PUBLICATION_FIELDS: &[&str] = &[
    "id",
    "published",
    "updated",
    "subscriptions",
    "name",
    "author",
    "displayOrder",
    "subscriberCount",
    "associationCount",
    "receiveEmails",
    "subscribersType",
    "beingProcessed",
    "type",
    "typeCode",
];

const SECURITY_GROUP_FIELDS: &[&str] = &[
    "id",
    "published",
    "updated",
    "administratorCount",
    "memberCount",
    "name",
    "description",
    "federated",
];

const STREAM_FIELDS: &[&str] = &[
    "id",
    "name",
    "published",
    "receiveEmails",
    "source",
    "updated",
    "type",
];

const SUBSCRIPTION_FIELDS: &[&str] = &[
    "id",
    "published",
    "updated",
    "name",
    "subscriberCount",
    "subscribers",
    "associations",
    "type",
    "typeCode",
];

const VIDEO_FIELDS: &[&str] = &[
    "id",
    "followerCount",
    "followed",
    "likeCount",
    "published",
    "tags",
    "updated",
    "contentID",
    "author",
    "content",
    "parent",
    "contentVideos",
    "favoriteCount",
    "replyCount",
    "status",
    "subject",
    "viewCount",
    "visibleToExternalContributors",
    "parentVisible",
    "parentContentVisible",
    "lastActivity",
    "abuseCount",
    "categories",
    "visibility",
    "duration",
    "inline",
    "externalID",
    "hours",
    "minutes",
    "seconds",
    "stillImageURL",
    "authtoken",
    "autoplay",
    "height",
    "playerBaseURL",
    "playerName",
    "width",
    "watermarkURL",
    "videoType",
    "videoMetadata",
    "embedded",
    "type",
    "typeCode",
    "lastActivityDate",
];

/// Supported datasets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Blog,
    Document,
    GroupAdmins,
    GroupMembers,
    Idea,
    People,
    Place,
    Publication,
    SecurityGroup,
    Space,
    Stream,
    Subscriptions,
    Video,
}

impl Dataset {
    pub const ALL: &'static [Dataset] = &[
        Dataset::Blog,
        Dataset::Document,
        Dataset::GroupAdmins,
        Dataset::GroupMembers,
        Dataset::Idea,
        Dataset::People,
        Dataset::Place,
        Dataset::Publication,
        Dataset::SecurityGroup,
        Dataset::Space,
        Dataset::Stream,
        Dataset::Subscriptions,
        Dataset::Video,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Dataset::Blog => "blog",
            Dataset::Document => "document",
            Dataset::GroupAdmins => "group_admins",
            Dataset::GroupMembers => "group_members",
            Dataset::Idea => "idea",
            Dataset::People => "people",
            Dataset::Place => "place",
            Dataset::Publication => "publication",
            Dataset::SecurityGroup => "security_group",
            Dataset::Space => "space",
            Dataset::Stream => "stream",
            Dataset::Subscriptions => "subscriptions",
            Dataset::Video => "video",
        }
    }

    /// Default return fields, in response order
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            Dataset::Blog | Dataset::Place | Dataset::Space => PLACE_FIELDS,
            Dataset::Document => DOCUMENT_FIELDS,
            Dataset::GroupAdmins | Dataset::GroupMembers | Dataset::People => PEOPLE_FIELDS,
            Dataset::Idea => IDEA_FIELDS,
            Dataset::Publication => PUBLICATION_FIELDS,
            Dataset::SecurityGroup => SECURITY_GROUP_FIELDS,
            Dataset::Stream => STREAM_FIELDS,
            Dataset::Subscriptions => SUBSCRIPTION_FIELDS,
            Dataset::Video => VIDEO_FIELDS,
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dataset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Dataset::ALL
            .iter()
            .copied()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| Error::invalid_dataset(s))
    }
}
