//! Settings file.
//!
//! An optional TOML file can set defaults for the command-line flags:
//!
//! ```toml
//! docs_base_url = "https://statistics-for-strava-docs.robiningelbrecht.be/#/configuration/"
//! open_docs = false
//! fail_fast = false
//! format = "text"
//! ```
//!
//! Flags given on the command line take precedence.

use clap::ValueEnum;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_DOCS_BASE_URL: &str =
    "https://statistics-for-strava-docs.robiningelbrecht.be/#/configuration/";

/// How reports are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Prefix of every documentation link
    pub docs_base_url: String,

    /// Open field documentation in a browser as errors are reported
    pub open_docs: bool,

    /// Stop after the first document that fails
    pub fail_fast: bool,

    pub format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            docs_base_url: DEFAULT_DOCS_BASE_URL.to_string(),
            open_docs: false,
            fail_fast: false,
            format: OutputFormat::Text,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
