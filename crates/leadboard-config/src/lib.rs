//! Configuration management for Leadboard
//!
//! Settings are read from a YAML file, overridden by `LEADBOARD_*`
//! environment variables and validated before use.

pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::{ConfigError, ConfigLoader, CONFIG_PATH_VAR};
pub use settings::{AggregationConfig, Config, InputConfig, LoggingConfig, OutputConfig};
