//! CLI module
//!
//! Command-line interface over the Core API client.
//!
//! # Commands
//!
//! - `version` - Show platform and API version information
//! - `get` - Look up a single entity
//! - `paginate` - Collect every record under a query
//! - `datasets` - List known datasets and their fields

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
