//! Application configuration structures

use leadboard_common::{LogFormat, LoggingConfig as LogSettings};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::Validate;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// Aggregation behaviour
    #[validate(nested)]
    pub aggregation: AggregationConfig,

    /// Where lead records are read from
    pub input: InputConfig,

    /// Report rendering
    pub output: OutputConfig,

    /// Logging configuration
    #[validate(nested)]
    pub logging: LoggingConfig,
}

/// Aggregation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AggregationConfig {
    /// Number of entries kept by each top-N ranking
    #[validate(range(min = 1, max = 50, message = "Top-N limit must be between 1 and 50"))]
    pub top_n_limit: usize,

    /// Number of rows in the recent leads list
    #[validate(range(min = 1, max = 500, message = "Recent leads limit must be between 1 and 500"))]
    pub recent_leads_limit: usize,

    /// IANA timezone used for weekday bucketing and date-range filtering
    #[validate(custom(
        function = "crate::validation::validate_timezone",
        message = "Timezone must be a valid IANA timezone name"
    ))]
    pub timezone: String,

    /// Source value that marks a lead as organic
    #[validate(length(min = 1, message = "Organic source label cannot be empty"))]
    #[validate(custom(
        function = "crate::validation::validate_not_blank",
        message = "Organic source label cannot be blank"
    ))]
    pub organic_source_label: String,
}

/// Input configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// JSON export of lead rows; read from stdin when unset
    pub path: Option<PathBuf>,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print the JSON report
    pub pretty: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[validate(custom(
        function = "crate::validation::validate_log_level",
        message = "Log level must be one of: trace, debug, info, warn, error"
    ))]
    pub level: String,

    /// Output format (pretty, compact, json)
    pub format: LogFormat,

    /// Optional log file path
    #[validate(custom(function = "crate::validation::validate_file_path"))]
    pub file: Option<String>,

    /// Whether to log span open/close events
    pub include_spans: bool,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            top_n_limit: 5,
            recent_leads_limit: 10,
            timezone: "UTC".to_string(),
            organic_source_label: "Orgânico".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            file: None,
            include_spans: false,
        }
    }
}

impl LoggingConfig {
    /// Settings consumed by `leadboard_common::init_logging`
    pub fn to_log_settings(&self) -> LogSettings {
        LogSettings {
            level: self.level.clone(),
            format: self.format,
            file_path: self.file.as_ref().map(PathBuf::from),
            include_spans: self.include_spans,
            ..LogSettings::default()
        }
    }
}

impl Config {
    /// Comprehensive validation of the entire configuration
    pub fn validate_all(&self) -> Result<(), validator::ValidationErrors> {
        self.validate()
    }
}
