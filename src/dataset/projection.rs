//! Field projection engine
//!
//! Flattens a raw Core API object into a `field -> value` map for a dataset
//! or an explicit field list.

use super::schema::{alias_path, resolve_path, Dataset};
use crate::error::Result;
use crate::types::{JsonObject, JsonValue};
use tracing::warn;

/// Fields to extract from each record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSelection {
    /// The dataset's default field list
    Dataset(Dataset),
    /// Caller-supplied field names
    Fields(Vec<String>),
    /// Every top-level field, unchanged
    Raw,
}

impl FieldSelection {
    /// Resolve the selection for a dataset name and optional return fields.
    ///
    /// Non-empty `return_fields` win and the dataset name is not consulted.
    /// Otherwise an unknown dataset name is an `InvalidDataset` error.
    pub fn resolve(dataset: &str, return_fields: Option<&[String]>) -> Result<Self> {
        match return_fields {
            Some(fields) if !fields.is_empty() => Ok(FieldSelection::Fields(fields.to_vec())),
            _ => Ok(FieldSelection::Dataset(dataset.parse()?)),
        }
    }

    /// Field names in order; empty for [`FieldSelection::Raw`]
    pub fn names(&self) -> Vec<&str> {
        match self {
            FieldSelection::Dataset(dataset) => dataset.fields().to_vec(),
            FieldSelection::Fields(fields) => fields.iter().map(String::as_str).collect(),
            FieldSelection::Raw => Vec::new(),
        }
    }
}

impl From<Dataset> for FieldSelection {
    fn from(dataset: Dataset) -> Self {
        FieldSelection::Dataset(dataset)
    }
}

/// Look up one field: the literal key first, then a well-known dotted alias.
pub fn resolve_field<'a>(json: &'a JsonValue, field: &str) -> Option<&'a JsonValue> {
    json.get(field)
        .or_else(|| alias_path(field).and_then(|path| resolve_path(json, path)))
}

/// Project `json` onto `selection`.
///
/// Missing fields are left out of the result. Each one is reported with a
/// warning unless `quiet` is set.
pub fn project(json: &JsonValue, selection: &FieldSelection, quiet: bool) -> JsonObject {
    if *selection == FieldSelection::Raw {
        return json.as_object().cloned().unwrap_or_default();
    }

    let mut record = JsonObject::new();
    for field in selection.names() {
        match resolve_field(json, field) {
            Some(value) => {
                record.insert(field.to_string(), value.clone());
            }
            None if !quiet => {
                warn!("Unable to locate the '{}' field in the API response data.", field);
            }
            None => {}
        }
    }
    record
}

/// Project `json` for a dataset name or explicit return fields.
///
/// Fails only with `InvalidDataset`, when no return fields are given and
/// `dataset` is not a known dataset.
pub fn project_fields(
    json: &JsonValue,
    dataset: &str,
    return_fields: Option<&[String]>,
    quiet: bool,
) -> Result<JsonObject> {
    let selection = FieldSelection::resolve(dataset, return_fields)?;
    Ok(project(json, &selection, quiet))
}
