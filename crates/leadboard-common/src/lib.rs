//! # Leadboard Common
//!
//! Shared types, utilities, and common functionality for Leadboard.
//!
//! This crate provides the lead record model, the field and timestamp
//! normalization rules every aggregator relies on, the workspace error type,
//! and the logging bootstrap used by the binary.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod macros;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

// Re-export commonly used types
pub use error::{LeadboardError, Result};
pub use logging::{init_default_logging, init_logging, LogFormat, LoggingConfig};
pub use types::*;
pub use utils::{normalize_field, parse_creation_time, CreationTime};
