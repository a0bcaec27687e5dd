//! Publication helpers

use super::core::CoreApi;
use crate::dataset::{project, Dataset, FieldSelection};
use crate::error::Result;
use crate::http::ResponseCheck;
use crate::pagination::PaginatedQuery;
use crate::query::{Endpoint, LookupType};
use crate::types::JsonObject;

impl CoreApi {
    pub async fn get_all_publications(
        &self,
        return_fields: Option<&[String]>,
        ignore_exceptions: bool,
    ) -> Result<Vec<JsonObject>> {
        let query = PaginatedQuery::new(self.query_url(["publications"]), Dataset::Publication.as_str())
            .return_fields(return_fields.unwrap_or_default().iter().cloned())
            .ignore_exceptions(ignore_exceptions);
        self.get_paginated(query).await
    }

    pub async fn get_publication(
        &self,
        publication_id: &str,
        return_fields: Option<&[String]>,
        ignore_exceptions: bool,
    ) -> Result<JsonObject> {
        let publication = self
            .get_data(
                Endpoint::Publications,
                publication_id,
                LookupType::Id,
                true,
                ignore_exceptions,
            )
            .await?;
        if publication.as_object().is_some_and(JsonObject::is_empty) {
            return Ok(JsonObject::new());
        }
        let selection = FieldSelection::resolve(Dataset::Publication.as_str(), return_fields)?;
        Ok(project(&publication, &selection, false))
    }

    /// Delete a publication; succeeds on 200 or 204
    pub async fn delete_publication(&self, publication_id: &str) -> Result<()> {
        let url = self.query_url(["publications", publication_id]);
        let response = self.client().delete(&url, true).await?;
        ResponseCheck::delete(&[200, 204]).check(&response)?;
        Ok(())
    }
}
