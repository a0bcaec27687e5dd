//! Helper file configuration
//!
//! The helper file is a small YAML document holding the connection details
//! and console styling preferences:
//!
//! ```yaml
//! connection:
//!   base_url: https://community.example.com
//!   credentials:
//!     username: api_user
//!     password: secret
//! styling:
//!   use_console_colors: yes
//! modules_to_import: [core, users]
//! ```

use crate::error::{Error, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

// ============================================================================
// Helper Config
// ============================================================================

/// Parsed helper file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelperConfig {
    /// Connection information
    pub connection: ConnectionSection,

    /// Console styling
    #[serde(default)]
    pub styling: StylingSection,

    /// Modules the caller wants initialized
    #[serde(default)]
    pub modules_to_import: Vec<String>,
}

/// `connection:` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionSection {
    /// Domain or platform URL of the environment
    pub base_url: String,

    /// Basic auth credentials
    pub credentials: CredentialsSection,
}

/// `connection.credentials:` section
#[derive(Clone, Serialize, Deserialize)]
pub struct CredentialsSection {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for CredentialsSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsSection")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// `styling:` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StylingSection {
    /// Raw YAML value; interpreted by [`HelperConfig::use_console_colors`]
    #[serde(default)]
    pub use_console_colors: Option<serde_yaml::Value>,
}

impl HelperConfig {
    /// Load a helper file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read helper file '{}'", path.display()))?;
        Self::from_yaml_str(&content)
    }

    /// Parse a helper file from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: HelperConfig = serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("Failed to parse helper YAML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.connection.base_url.trim().is_empty() {
            return Err(Error::config("connection.base_url cannot be empty"));
        }
        if self.connection.credentials.username.is_empty()
            || self.connection.credentials.password.is_empty()
        {
            return Err(Error::IncompleteCredentials);
        }
        Ok(())
    }

    /// Whether console colors are enabled.
    ///
    /// Accepts YAML booleans and the strings `yes`/`no`/`true`/`false`.
    /// Anything else falls back to `false` with a warning.
    pub fn use_console_colors(&self) -> bool {
        let Some(value) = &self.styling.use_console_colors else {
            return false;
        };
        match value {
            serde_yaml::Value::Bool(b) => *b,
            serde_yaml::Value::String(s) => match s.to_ascii_lowercase().as_str() {
                "yes" | "true" => true,
                "no" | "false" => false,
                _ => {
                    warn!(
                        "The value '{}' is not a valid option for the 'use_console_colors' setting. The value will be set to false.",
                        s
                    );
                    false
                }
            },
            other => {
                warn!(
                    "The value '{:?}' is not a valid option for the 'use_console_colors' setting. The value will be set to false.",
                    other
                );
                false
            }
        }
    }
}
