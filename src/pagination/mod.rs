//! Pagination module
//!
//! Turns the Core API's single-page `count`/`startIndex` fetch into a full
//! collection.
//!
//! # Termination
//!
//! Collection stops on the first page with no records, not on the first
//! short page. A collection of N records therefore takes `ceil(N / 100) + 1`
//! requests, the last one at the first offset past the data.

mod collector;
mod types;

pub use collector::{get_paginated, PaginatedCollector};
pub use types::{PaginatedQuery, PaginationState, PAGE_SIZE};
