//! Dataset module
//!
//! Named field schemas and the projection of raw API objects onto them.
//!
//! # Resolution order
//!
//! For every requested field:
//! 1. a literal top-level key of that name
//! 2. a well-known dotted alias such as `email.value` (`emails[0].value`)
//! 3. otherwise the field is missing and left out of the record

mod identify;
mod projection;
mod schema;

pub use identify::identify_dataset;
pub use projection::{project, project_fields, resolve_field, FieldSelection};
pub use schema::{alias_path, resolve_path, Dataset, PathStep};
