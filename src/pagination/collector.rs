//! Paginated collector
//!
//! Walks `startIndex` in steps of the page size until a page comes back
//! empty. Pages are requested strictly one after another.

use super::types::{PaginatedQuery, PaginationState};
use crate::dataset::{project, FieldSelection};
use crate::error::Result;
use crate::http::{check_json_body, HttpClient, ResponseCheck};
use crate::types::{JsonObject, JsonValue};
use tracing::{debug, warn};

/// Collects every record of a [`PaginatedQuery`]
#[derive(Debug)]
pub struct PaginatedCollector<'a> {
    client: &'a HttpClient,
    query: PaginatedQuery,
    selection: FieldSelection,
}

impl<'a> PaginatedCollector<'a> {
    /// Fails with `InvalidDataset` before any request when the query names
    /// an unknown dataset and no explicit return fields.
    pub fn new(client: &'a HttpClient, query: PaginatedQuery) -> Result<Self> {
        let selection = FieldSelection::resolve(&query.dataset, query.return_fields.as_deref())?;
        Ok(Self {
            client,
            query,
            selection,
        })
    }

    /// Use `selection` instead of the query's dataset and return fields
    pub fn with_selection(
        client: &'a HttpClient,
        query: PaginatedQuery,
        selection: FieldSelection,
    ) -> Self {
        Self {
            client,
            query,
            selection,
        }
    }

    pub fn query(&self) -> &PaginatedQuery {
        &self.query
    }

    /// Fetch and project a single page.
    ///
    /// A failed page is an error, or an empty page after a warning when the
    /// query ignores exceptions.
    pub async fn fetch_page(&self, start_index: u64) -> Result<Vec<JsonObject>> {
        let url = self.query.page_url(start_index);
        let response = self.client.get_with_retries(&url, true).await?;

        let check = ResponseCheck::get().ignore_exceptions(self.query.ignore_exceptions);
        if !check.check(&response)? {
            return Ok(Vec::new());
        }

        let body: JsonValue = response.json()?;
        if !check_json_body(&body, &self.query.dataset, self.query.ignore_exceptions)? {
            return Ok(Vec::new());
        }

        let Some(items) = body.get("list").and_then(JsonValue::as_array) else {
            warn!("The paginated response from {} has no 'list' array", url);
            return Ok(Vec::new());
        };

        Ok(items
            .iter()
            .map(|item| project(item, &self.selection, self.query.quiet))
            .collect())
    }

    /// Fetch every page, in order, until one is empty
    pub async fn collect_all(&self) -> Result<Vec<JsonObject>> {
        let (records, _) = self.collect_with_state().await?;
        Ok(records)
    }

    /// [`collect_all`](Self::collect_all), also returning the final state
    pub async fn collect_with_state(&self) -> Result<(Vec<JsonObject>, PaginationState)> {
        let mut state = PaginationState::new();
        let mut records = Vec::new();

        while !state.done {
            let page = self.fetch_page(state.start_index).await?;
            debug!(
                "Page at startIndex={} returned {} records",
                state.start_index,
                page.len()
            );
            state.record_page(page.len(), self.query.page_size);
            records.extend(page);
        }

        debug!(
            "Collected {} records from {} in {} requests",
            state.total_fetched,
            self.query.query,
            state.pages_fetched
        );
        Ok((records, state))
    }
}

/// Collect every record of `query`
pub async fn get_paginated(client: &HttpClient, query: PaginatedQuery) -> Result<Vec<JsonObject>> {
    PaginatedCollector::new(client, query)?.collect_all().await
}
