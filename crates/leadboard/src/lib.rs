//! # Leadboard
//!
//! Command line front end for the lead aggregation pipeline.
//!
//! Reads a JSON export of lead rows, applies the dashboard filters given on
//! the command line and prints the aggregate snapshot (or the available
//! filter choices) as JSON.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod app;
pub mod cli;
pub mod error;

pub use app::{load_config, run, Report};
pub use cli::Args;
pub use error::*;
