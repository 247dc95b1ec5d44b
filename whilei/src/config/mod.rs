//! Interpreter configuration loaded from TOML

use crate::interp::{DecPolicy, Options};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Settings read from a `whilei.toml` file
///
/// ```toml
/// verbose = true
/// dec = "saturating"
/// max_iterations = 100000
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Print the input, its statements and the final bindings
    pub verbose: bool,
    /// Behaviour of `dec` below zero
    pub dec: DecPolicy,
    /// Per-loop iteration cap; absent means loops may run forever
    pub max_iterations: Option<u64>,
}

/// Configuration loading error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

impl Config {
    /// Parse TOML text
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Read and parse a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse { path: display, source })
    }

    pub fn options(&self) -> Options {
        Options {
            dec_policy: self.dec,
            max_iterations: self.max_iterations,
        }
    }
}
