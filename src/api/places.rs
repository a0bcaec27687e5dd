//! Place and space helpers

use super::core::CoreApi;
use super::id_string;
use crate::dataset::{project, Dataset, FieldSelection};
use crate::error::{Error, Result};
use crate::pagination::{PaginatedCollector, PaginatedQuery};
use crate::query::append_query;
use crate::types::{JsonObject, JsonValue};

/// `entityDescriptor` object type for spaces
const SPACE_OBJECT_TYPE: u32 = 14;

impl CoreApi {
    /// One place by Browse ID
    pub async fn get_place_info(
        &self,
        browse_id: &str,
        return_fields: Option<&[String]>,
        ignore_exceptions: bool,
    ) -> Result<JsonObject> {
        let url = append_query(&self.query_url(["places", browse_id]), "fields=@all");
        let selection = FieldSelection::resolve(Dataset::Place.as_str(), return_fields)?;
        match self.get_entity(&url, "place", ignore_exceptions).await? {
            Some(place) => Ok(project(&place, &selection, false)),
            None => Ok(JsonObject::new()),
        }
    }

    /// Browse ID (`placeID`) of a space given its Container ID
    pub async fn get_place_id(&self, container_id: &str) -> Result<String> {
        let url = append_query(
            &self.query_url(["places"]),
            &format!("filter=entityDescriptor({SPACE_OBJECT_TYPE},{container_id})&fields=@all"),
        );
        let body = self.get_checked_json(&url, "place").await?;
        body.get("list")
            .and_then(|list| list.get(0))
            .and_then(|place| place.get("placeID"))
            .and_then(id_string)
            .ok_or_else(|| Error::NotFound {
                subject: "place".to_string(),
                message: format!("no place has the Container ID {container_id}"),
            })
    }

    /// Applied entitlements of a space, unprojected
    pub async fn get_space_permissions(&self, browse_id: &str) -> Result<Vec<JsonValue>> {
        let query = PaginatedQuery::new(
            self.query_url(["places", browse_id, "appliedEntitlements"]),
            "space",
        );
        let collector = PaginatedCollector::with_selection(self.client(), query, FieldSelection::Raw);
        Ok(collector
            .collect_all()
            .await?
            .into_iter()
            .map(JsonValue::Object)
            .collect())
    }
}
