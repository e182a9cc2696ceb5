//! Application-wide error types using thiserror.

use leadboard_common::LeadboardError;
use leadboard_config::ConfigError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Failure reported by a workspace crate.
    #[error(transparent)]
    Leadboard(#[from] LeadboardError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O error while reading stdin.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Report or input JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A newer refresh replaced this one.
    #[error("Refresh generation {0} was superseded")]
    Superseded(u64),
}

/// Result type for the application.
pub type AppResult<T> = Result<T, AppError>;
