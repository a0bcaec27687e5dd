//! CLI runner - executes commands

use crate::api::{ApiInfoFilter, CoreApi};
use crate::cli::commands::{Cli, Commands};
use crate::config::HelperConfig;
use crate::connection::{Connection, Credentials};
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::http::HttpClientConfig;
use crate::pagination::PaginatedQuery;
use crate::query::{Endpoint, FilterClause, LookupType};
use serde_json::{json, Value};
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
    helper: Option<HelperConfig>,
}

impl Runner {
    /// Create a new runner, loading the helper file if one was given
    pub fn new(cli: Cli) -> Result<Self> {
        let helper = cli.helper.as_ref().map(HelperConfig::load).transpose()?;
        Ok(Self { cli, helper })
    }

    pub fn helper(&self) -> Option<&HelperConfig> {
        self.helper.as_ref()
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Datasets => self.datasets(),
            Commands::Version { filter } => self.version(filter.as_deref()).await,
            Commands::Get {
                endpoint,
                lookup,
                identifier,
                all_fields,
                ignore_errors,
            } => {
                self.get(endpoint, lookup, identifier, *all_fields, *ignore_errors)
                    .await
            }
            Commands::Paginate {
                segments,
                dataset,
                filters,
                fields,
                query,
                no_all_fields,
                ignore_errors,
            } => {
                let filters = filters
                    .iter()
                    .map(|f| f.parse::<FilterClause>())
                    .collect::<Result<Vec<_>>>()?;
                let api = self.api()?;
                let mut paginated = PaginatedQuery::new(api.query_url(segments), dataset.as_str())
                    .filters(filters)
                    .all_fields(!no_all_fields)
                    .return_fields(fields.iter().cloned())
                    .ignore_exceptions(*ignore_errors);
                if let Some(query) = query {
                    paginated = paginated.extra_query(query.as_str());
                }

                let records = api.get_paginated(paginated).await?;
                debug!("Collected {} records", records.len());
                print_json(&Value::Array(records.into_iter().map(Value::Object).collect()))
            }
        }
    }

    /// Build the connection from the helper file or the command-line options
    fn connection(&self) -> Result<Connection> {
        if let Some(helper) = &self.helper {
            return Connection::from_helper(helper);
        }

        let url = self
            .cli
            .url
            .as_deref()
            .ok_or_else(|| Error::config("No connection given (use --helper or --url)"))?;
        let credentials = match (&self.cli.username, &self.cli.password) {
            (Some(username), Some(password)) => Credentials::new(username, password)?,
            (None, None) => return Err(Error::NoCredentials),
            _ => return Err(Error::IncompleteCredentials),
        };
        Connection::connect(url, credentials)
    }

    fn api(&self) -> Result<CoreApi> {
        let config = HttpClientConfig::builder()
            .max_retries(self.cli.retries)
            .build();
        CoreApi::with_config(self.connection()?, config)
    }

    async fn version(&self, filter: Option<&str>) -> Result<()> {
        let filter = filter
            .map(str::parse::<ApiInfoFilter>)
            .transpose()?
            .unwrap_or_default();
        let info = self.api()?.get_api_info(filter).await?;
        print_json(&info)
    }

    async fn get(
        &self,
        endpoint: &str,
        lookup: &str,
        identifier: &str,
        all_fields: bool,
        ignore_errors: bool,
    ) -> Result<()> {
        let endpoint: Endpoint = endpoint.parse()?;
        let identifier: LookupType = identifier.parse()?;
        let data = self
            .api()?
            .get_data(endpoint, lookup, identifier, all_fields, ignore_errors)
            .await?;
        print_json(&data)
    }

    fn datasets(&self) -> Result<()> {
        let listing: serde_json::Map<String, Value> = Dataset::ALL
            .iter()
            .map(|dataset| (dataset.as_str().to_string(), json!(dataset.fields())))
            .collect();
        print_json(&Value::Object(listing))
    }
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
