//! Configuration loading functionality
//!
//! This module contains functions for locating and loading configuration files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use directories::ProjectDirs;
use log::debug;
use serde_yaml::from_str;

use crate::constants::{APPLICATION, DEFAULT_CONFIG_FILE, ORGANIZATION, QUALIFIER};
use crate::errors::config_parsing_error;

use super::model::Config;

/// Loads a configuration from a YAML file
///
/// The loaded configuration is not validated, since command-line flags may
/// still fill in missing values.
///
/// # Arguments
/// * `file` - Path to the configuration file
///
/// # Errors
/// Returns an error if the file cannot be read or is not valid YAML
pub fn load_config(file: &Path) -> Result<Config> {
    let file_content = fs::read(file).map_err(|e| {
        anyhow!(
            "Failed to read configuration file {}: {}",
            file.display(),
            e
        )
    })?;

    let content_str = String::from_utf8(file_content).map_err(|e| {
        anyhow!(
            "Configuration file {} contains invalid UTF-8 characters: {}",
            file.display(),
            e
        )
    })?;

    let config: Config = from_str(&content_str).map_err(|e| {
        config_parsing_error(
            e,
            &format!(
                "Failed to parse configuration file {}. Please check the YAML syntax.",
                file.display()
            ),
        )
    })?;

    debug!("Loaded configuration from {}", file.display());
    Ok(config)
}

/// Returns the default configuration file path if that file exists
///
/// The default file lives in the platform configuration directory, e.g.
/// `~/.config/drive_fetch/config.yaml` on Linux.
pub fn default_config_path() -> Option<PathBuf> {
    let folder = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)?;
    let path = folder.config_dir().join(DEFAULT_CONFIG_FILE);
    path.is_file().then_some(path)
}

/// Loads the explicitly requested configuration, the default one, or defaults
///
/// # Arguments
/// * `explicit` - Path given on the command line, if any
///
/// # Errors
/// Returns an error if an explicitly requested file does not exist or any
/// configuration file fails to load
pub fn resolve_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(anyhow!(
                    "Configuration file does not exist: {}",
                    path.display()
                ));
            }
            load_config(path)
        }
        None => match default_config_path() {
            Some(path) => load_config(&path),
            None => {
                debug!("No configuration file found, using defaults");
                Ok(Config::default())
            }
        },
    }
}
