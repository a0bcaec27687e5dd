//! Pagination types
//!
//! The query descriptor for a "fetch everything" call and the per-call state
//! tracked while walking its pages.

use crate::query::{filter_syntax, strip_query, FilterClause};

/// Records requested per page
pub const PAGE_SIZE: u32 = 100;

/// Describes one paginated collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginatedQuery {
    /// Query URL; any query string is dropped before paging params are added
    pub query: String,
    /// Dataset name used for projection
    pub dataset: String,
    /// `filter=element(criteria)` clauses, all applied
    pub filters: Vec<FilterClause>,
    /// Request `fields=@all`
    pub all_fields: bool,
    /// Explicit fields; overrides the dataset's default list
    pub return_fields: Option<Vec<String>>,
    /// Extra query parameters appended after the paging params
    pub extra_query: Option<String>,
    pub page_size: u32,
    /// Turn failed pages into warnings and stop collecting
    pub ignore_exceptions: bool,
    /// Don't report fields missing from a record
    pub quiet: bool,
}

impl PaginatedQuery {
    pub fn new(query: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            dataset: dataset.into(),
            filters: Vec::new(),
            all_fields: true,
            return_fields: None,
            extra_query: None,
            page_size: PAGE_SIZE,
            ignore_exceptions: false,
            quiet: false,
        }
    }

    /// Add a filter clause
    #[must_use]
    pub fn filter(mut self, element: impl Into<String>, criteria: impl Into<String>) -> Self {
        self.filters.push(FilterClause::new(element, criteria));
        self
    }

    /// Add several filter clauses
    #[must_use]
    pub fn filters(mut self, filters: impl IntoIterator<Item = FilterClause>) -> Self {
        self.filters.extend(filters);
        self
    }

    #[must_use]
    pub fn all_fields(mut self, all_fields: bool) -> Self {
        self.all_fields = all_fields;
        self
    }

    #[must_use]
    pub fn return_fields<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        self.return_fields = if fields.is_empty() { None } else { Some(fields) };
        self
    }

    /// Append extra query parameters (without a leading `?`)
    #[must_use]
    pub fn extra_query(mut self, query_string: impl Into<String>) -> Self {
        let query_string = query_string.into();
        let query_string = query_string.trim_start_matches(['?', '&']);
        self.extra_query = if query_string.is_empty() {
            None
        } else {
            Some(query_string.to_string())
        };
        self
    }

    #[must_use]
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    #[must_use]
    pub fn ignore_exceptions(mut self, ignore: bool) -> Self {
        self.ignore_exceptions = ignore;
        self
    }

    #[must_use]
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// URL of the page starting at `start_index`
    pub fn page_url(&self, start_index: u64) -> String {
        let extra = self.extra_query.as_deref().unwrap_or_default();
        let fields = if self.all_fields && !extra.contains("fields=@all") {
            "fields=@all&"
        } else {
            ""
        };
        let mut url = format!(
            "{}?{}count={}&startIndex={}{}",
            strip_query(&self.query),
            fields,
            self.page_size,
            start_index,
            filter_syntax(&self.filters, true)
        );
        if !extra.is_empty() {
            url.push('&');
            url.push_str(extra);
        }
        url
    }
}

/// Progress of one collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationState {
    /// `startIndex` of the next page
    pub start_index: u64,
    /// Requests issued so far
    pub pages_fetched: u32,
    /// Records collected so far
    pub total_fetched: u64,
    pub done: bool,
}

impl PaginationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a page of `count` records. An empty page ends the collection;
    /// any other page advances `start_index` by a full page.
    pub fn record_page(&mut self, count: usize, page_size: u32) {
        self.pages_fetched += 1;
        self.total_fetched += count as u64;
        if count == 0 {
            self.done = true;
        } else {
            self.start_index += u64::from(page_size);
        }
    }

    pub fn mark_done(&mut self) {
        self.done = true;
    }
}
