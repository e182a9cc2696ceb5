//! Configuration loading utilities

use crate::Config;
use leadboard_common::{LeadboardError, LogFormat, Result as LeadboardResult};
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_VAR: &str = "LEADBOARD_CONFIG_PATH";

/// Files probed in the working directory when no path is given
const DEFAULT_CONFIG_FILES: &[&str] = &["leadboard.yaml", "leadboard.yml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for LeadboardError {
    fn from(err: ConfigError) -> Self {
        LeadboardError::config_with_source("Failed to load configuration", err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config: Config = serde_yaml::from_str(&content)?;
        debug!(path = %path.as_ref().display(), "Parsed configuration file");

        Self::apply_env_overrides(&mut config)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from the environment, the working directory, or defaults
    pub fn load() -> LeadboardResult<Config> {
        match Self::discover_path() {
            Some(path) => Self::load_from_file(path),
            None => {
                debug!("No configuration file found, using defaults");
                let mut config = Config::default();
                Self::apply_env_overrides(&mut config)?;
                config.validate_all().map_err(ConfigError::ValidationError)?;
                Ok(config)
            }
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> LeadboardResult<Config> {
        Ok(Self::load_config(path)?)
    }

    fn discover_path() -> Option<PathBuf> {
        if let Ok(path) = env::var(CONFIG_PATH_VAR) {
            return Some(PathBuf::from(path));
        }
        DEFAULT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|candidate| candidate.exists())
    }

    /// Apply overrides from the process environment
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_env_overrides_from(config, |var| env::var(var).ok())
    }

    /// Apply overrides using `lookup` to resolve variable names
    pub fn apply_env_overrides_from<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Aggregation
        if let Some(limit) = lookup("LEADBOARD_TOP_N") {
            config.aggregation.top_n_limit = parse_var("LEADBOARD_TOP_N", &limit)?;
        }

        if let Some(limit) = lookup("LEADBOARD_RECENT_LIMIT") {
            config.aggregation.recent_leads_limit = parse_var("LEADBOARD_RECENT_LIMIT", &limit)?;
        }

        if let Some(timezone) = lookup("LEADBOARD_TIMEZONE") {
            config.aggregation.timezone = timezone;
        }

        if let Some(label) = lookup("LEADBOARD_ORGANIC_LABEL") {
            config.aggregation.organic_source_label = label;
        }

        // Input and output
        if let Some(path) = lookup("LEADBOARD_INPUT") {
            config.input.path = Some(PathBuf::from(path));
        }

        if let Some(pretty) = lookup("LEADBOARD_PRETTY") {
            config.output.pretty = parse_var("LEADBOARD_PRETTY", &pretty)?;
        }

        // Logging
        if let Some(level) = lookup("LEADBOARD_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(format) = lookup("LEADBOARD_LOG_FORMAT") {
            config.logging.format = parse_var::<LogFormat>("LEADBOARD_LOG_FORMAT", &format)?;
        }

        if let Some(file) = lookup("LEADBOARD_LOG_FILE") {
            config.logging.file = Some(file);
        }

        Ok(())
    }
}

fn parse_var<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::EnvParseError {
        var: var.to_string(),
        source: Box::new(e),
    })
}
