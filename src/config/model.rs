//! Configuration data structures
//!
//! This module contains the data structures for configuration.

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Deserializer};

use crate::constants::{DEFAULT_OUTPUT_DIR, DEFAULT_SOURCE};
use crate::storage::SearchOptions;

/// Configuration for a fetch run
///
/// Every field is optional in the YAML file; missing fields take their
/// defaults and command-line flags override whatever the file provides.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Root directory of the storage tree
    #[serde(deserialize_with = "deserialize_expanded_path")]
    pub source: PathBuf,
    /// Folder to start the search from, relative to the storage root
    pub folder_id: Option<String>,
    /// Regex pattern matched against file names
    pub pattern: String,
    /// Deepest folder level to search, unlimited if missing
    pub max_depth: Option<usize>,
    /// Maximum number of files to fetch, unlimited if missing
    pub max_results: Option<usize>,
    /// Only list and preview, don't download
    pub dry_run: bool,
    /// Directory downloaded files are written to
    #[serde(deserialize_with = "deserialize_expanded_path")]
    pub output_dir: PathBuf,
    /// Named-group pattern used to rewrite destination paths
    pub path_pattern: Option<String>,
    /// Format template used to rewrite destination paths
    pub path_format: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source: PathBuf::from(DEFAULT_SOURCE),
            folder_id: None,
            pattern: String::new(),
            max_depth: None,
            max_results: None,
            dry_run: false,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            path_pattern: None,
            path_format: None,
        }
    }
}

impl Config {
    /// Validates the configuration
    ///
    /// Only checks the shape of the configuration. Patterns are compiled, and
    /// reported, when a run starts.
    ///
    /// # Errors
    /// * Returns an error if no file pattern is set
    /// * Returns an error if only one of `path_pattern` and `path_format` is set
    pub fn validate(&self) -> Result<()> {
        if self.pattern.is_empty() {
            return Err(anyhow!(
                "No file pattern specified. Use --pattern or set `pattern` in the configuration file."
            ));
        }

        if self.path_pattern.is_some() != self.path_format.is_some() {
            return Err(anyhow!(
                "Both path-pattern and path-format must be provided together."
            ));
        }

        Ok(())
    }

    /// The path transformation pair, if one is configured
    pub fn path_transform(&self) -> Option<(&str, &str)> {
        match (&self.path_pattern, &self.path_format) {
            (Some(pattern), Some(format)) => Some((pattern.as_str(), format.as_str())),
            _ => None,
        }
    }

    /// Search limits derived from the configuration
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            max_depth: self.max_depth,
            max_results: self.max_results,
            ..SearchOptions::default()
        }
    }
}

/// Deserializes a path, expanding a leading `~` to the home directory
fn deserialize_expanded_path<'de, D>(deserializer: D) -> std::result::Result<PathBuf, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: String = Deserialize::deserialize(deserializer)?;
    Ok(expand_path(&raw))
}

/// Expands a leading `~` in a user supplied path
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}
