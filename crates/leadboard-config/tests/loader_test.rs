//! Integration tests for configuration discovery.
//!
//! Everything touching the process environment lives in a single test so
//! parallel test threads never observe each other's variables.

use leadboard_config::{ConfigLoader, CONFIG_PATH_VAR};
use std::env;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_uses_path_variable_and_env_overrides() {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(b"aggregation:\n  top_n_limit: 7\n  timezone: \"America/Sao_Paulo\"\n")
        .expect("Failed to write to temp file");

    env::set_var(CONFIG_PATH_VAR, file.path());
    env::set_var("LEADBOARD_RECENT_LIMIT", "15");

    let config = ConfigLoader::load().expect("Failed to load config");
    assert_eq!(config.aggregation.top_n_limit, 7);
    assert_eq!(config.aggregation.recent_leads_limit, 15);
    assert_eq!(config.aggregation.timezone, "America/Sao_Paulo");

    env::set_var("LEADBOARD_TOP_N", "0");
    let result = ConfigLoader::load();
    assert!(result.is_err(), "top_n_limit of zero must fail validation");

    env::remove_var("LEADBOARD_TOP_N");
    env::remove_var("LEADBOARD_RECENT_LIMIT");
    env::remove_var(CONFIG_PATH_VAR);
}

#[test]
fn test_load_from_file_wraps_errors() {
    let result = ConfigLoader::load_from_file("/nonexistent/leadboard.yaml");
    let err = result.unwrap_err();
    assert!(err.to_string().contains("Configuration error"));
}
