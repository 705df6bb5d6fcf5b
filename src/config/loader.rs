//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::schema::{builtin_networks, HarnessConfig, NetworkConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("Unknown network '{name}' (available: {available})")]
    UnknownNetwork { name: String, available: String },

    #[error("Environment variable {0} not set")]
    MissingVar(&'static str),

    #[error("Environment variable {var} is not a valid address: {reason}")]
    InvalidAddress { var: &'static str, reason: String },
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<HarnessConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

/// Load from `path` when given, otherwise validate the built-in defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<HarnessConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => {
            let config = HarnessConfig::default();
            validate_config(&config).map_err(ConfigError::Validation)?;
            Ok(config)
        }
    }
}

/// Parse TOML, merge file networks over the built-in presets, then validate.
pub fn parse_config(content: &str) -> Result<HarnessConfig, ConfigError> {
    let mut config: HarnessConfig = toml::from_str(content)?;

    let mut networks = builtin_networks();
    networks.extend(std::mem::take(&mut config.networks));
    for (name, network) in networks.iter_mut() {
        network.name = name.clone();
    }
    config.networks = networks;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

impl HarnessConfig {
    /// Look up a network by name.
    pub fn network(&self, name: &str) -> Result<&NetworkConfig, ConfigError> {
        self.networks
            .get(name)
            .ok_or_else(|| ConfigError::UnknownNetwork {
                name: name.to_string(),
                available: self
                    .networks
                    .keys()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}
