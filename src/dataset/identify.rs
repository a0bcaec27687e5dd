//! Dataset identification from a query URI

use super::schema::Dataset;
use crate::error::{Error, Result};

const URI_DATASETS: &[(&str, Dataset)] = &[
    ("v3/people", Dataset::People),
    ("v3/places", Dataset::Place),
    ("publications", Dataset::Publication),
    ("streams", Dataset::Stream),
    ("videos", Dataset::Video),
];

/// Pick the dataset whose URI marker appears in `query_uri`
pub fn identify_dataset(query_uri: &str) -> Result<Dataset> {
    if query_uri.contains("securityGroups") {
        return Ok(security_group_dataset(query_uri));
    }
    URI_DATASETS
        .iter()
        .find(|(marker, _)| query_uri.contains(marker))
        .map(|(_, dataset)| *dataset)
        .ok_or_else(|| Error::DatasetNotFound {
            uri: query_uri.to_string(),
        })
}

fn security_group_dataset(query_uri: &str) -> Dataset {
    if query_uri.contains("/administrators") {
        Dataset::GroupAdmins
    } else if query_uri.contains("/members") {
        Dataset::GroupMembers
    } else {
        Dataset::SecurityGroup
    }
}
