//! Configuration file loading for the command-line driver.
//!
//! Settings come from `chess.toml` in the current directory unless another
//! path is given. A missing file means defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// The file is not valid TOML or has the wrong shape.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Settings for the `chess` binary.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Log filter used when `RUST_LOG` is unset. Defaults to "warn".
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Indent JSON output. Defaults to true.
    #[serde(default = "default_pretty_json")]
    pub pretty_json: bool,
    /// Depth for `perft` when none is given. Defaults to 3.
    #[serde(default = "default_perft_depth")]
    pub perft_depth: u32,
}

fn default_log_filter() -> String {
    "warn".to_string()
}

fn default_pretty_json() -> bool {
    true
}

fn default_perft_depth() -> u32 {
    3
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            log_filter: default_log_filter(),
            pretty_json: default_pretty_json(),
            perft_depth: default_perft_depth(),
        }
    }
}

impl CliConfig {
    /// Loads the configuration from `path`, or defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if it contains invalid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Default location of the configuration file.
    pub fn default_path() -> PathBuf {
        PathBuf::from("chess.toml")
    }
}
