//! Settings file loading and validation.
//!
//! Settings live in a JSON file (default `varsync.json`, camelCase keys)
//! resolved against the working directory unless the CLI overrides the path.
//! Validation is eager: a missing or empty required field fails before any
//! remote contact.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{io_err, SettingsError};

/// Default settings file name, looked up in the working directory.
pub const SETTINGS_FILE: &str = "varsync.json";

/// Declared format of the desired-record source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Csv,
    Json,
}

impl SourceFormat {
    /// The file extension this format requires (without the dot).
    pub fn extension(self) -> &'static str {
        match self {
            SourceFormat::Csv => "csv",
            SourceFormat::Json => "json",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for SourceFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(SourceFormat::Csv),
            "json" => Ok(SourceFormat::Json),
            other => Err(format!("unknown source format '{other}'; expected: csv, json")),
        }
    }
}

/// The full settings document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Base URL of the variable store server.
    pub server_url: String,

    /// API key sent as `X-ApiKey`; anonymous access when absent.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Username/password sign-in, used only when both are present.
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub password: Option<String>,

    /// Remote project whose variable set is operated on.
    pub project_name: String,

    /// Target environment name for import.
    pub environment: String,

    /// Declared format of `variables_file_path`.
    pub variables_file_format: SourceFormat,

    /// Desired-record source file; also the output of `--parse`.
    pub variables_file_path: PathBuf,

    /// Destination of `--export`.
    #[serde(default)]
    pub export_path: Option<PathBuf>,

    /// Legacy XML `.config` consumed by `--parse`.
    #[serde(default)]
    pub legacy_config_path: Option<PathBuf>,
}

impl Settings {
    /// Load and validate settings from `path`.
    pub fn load_at(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        let settings: Settings =
            serde_json::from_str(&contents).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.validate(path)?;
        tracing::debug!("loaded settings from {}", path.display());
        Ok(settings)
    }

    fn validate(&self, path: &Path) -> Result<(), SettingsError> {
        let missing = |field| SettingsError::Missing {
            path: path.to_path_buf(),
            field,
        };
        if self.server_url.trim().is_empty() {
            return Err(missing("serverUrl"));
        }
        if self.project_name.trim().is_empty() {
            return Err(missing("projectName"));
        }
        if self.environment.trim().is_empty() {
            return Err(missing("environment"));
        }
        Ok(())
    }

    /// Username/password pair, when both are configured and non-empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.user_name.as_deref(), self.password.as_deref()) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => {
                Some((user, pass))
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
