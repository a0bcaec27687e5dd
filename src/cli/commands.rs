//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Khoros JX Core API client
#[derive(Parser, Debug)]
#[command(name = "khoros-jx")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Helper file (YAML) with connection details
    #[arg(short = 'H', long, global = true)]
    pub helper: Option<PathBuf>,

    /// Domain or platform URL (used without a helper file)
    #[arg(short, long, global = true)]
    pub url: Option<String>,

    /// API username
    #[arg(short = 'U', long, global = true)]
    pub username: Option<String>,

    /// API password
    #[arg(short = 'P', long, global = true)]
    pub password: Option<String>,

    /// Maximum retries on connection failure (0-100)
    #[arg(long, global = true, default_value = "5", value_parser = clap::value_parser!(u32).range(0..=100))]
    pub retries: u32,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show platform and API version information
    Version {
        /// Subset to show (platform, v2, v3, sso, edition, environment, tier)
        #[arg(long)]
        filter: Option<String>,
    },

    /// Look up a single entity
    Get {
        /// Endpoint name (e.g. people, places, securityGroups)
        endpoint: String,

        /// Lookup value (ID, email address or username)
        lookup: String,

        /// Lookup type (id, email, username)
        #[arg(long, default_value = "id")]
        identifier: String,

        /// Request every field with `fields=@all`
        #[arg(long)]
        all_fields: bool,

        /// Return an empty object instead of failing
        #[arg(long)]
        ignore_errors: bool,
    },

    /// Collect every record under a query
    Paginate {
        /// Path segments below the API root (e.g. securityGroups 1234 members)
        #[arg(required = true)]
        segments: Vec<String>,

        /// Dataset used to project each record
        #[arg(short, long)]
        dataset: String,

        /// Filter clause as `element=criteria` (repeatable)
        #[arg(short, long = "filter")]
        filters: Vec<String>,

        /// Fields to return instead of the dataset's fields (comma-separated)
        #[arg(long, value_delimiter = ',')]
        fields: Vec<String>,

        /// Extra query string appended to each page URL
        #[arg(long)]
        query: Option<String>,

        /// Do not request `fields=@all`
        #[arg(long)]
        no_all_fields: bool,

        /// Return partial results instead of failing on a bad page
        #[arg(long)]
        ignore_errors: bool,
    },

    /// List known datasets and their fields
    Datasets,
}
