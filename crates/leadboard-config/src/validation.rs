//! Custom validators used by the configuration structures

use chrono_tz::Tz;
use validator::ValidationError;

/// Validate an IANA timezone name against the chrono-tz database
pub fn validate_timezone(timezone: &str) -> Result<(), ValidationError> {
    if timezone.trim().is_empty() {
        return Err(ValidationError::new("empty_timezone"));
    }

    timezone
        .parse::<Tz>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid_timezone"))
}

/// Validate a tracing level name
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    match level {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ValidationError::new("invalid_log_level")),
    }
}

/// Reject strings made only of whitespace
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank_value"))
    } else {
        Ok(())
    }
}

/// Validate file path (basic check for valid path characters)
pub fn validate_file_path(path: &str) -> Result<(), ValidationError> {
    if path.is_empty() {
        return Err(ValidationError::new("empty_file_path"));
    }

    // Colon stays allowed for Windows drive letters
    let invalid_chars = ['<', '>', '"', '|', '?', '*'];
    if path.chars().any(|c| invalid_chars.contains(&c)) {
        return Err(ValidationError::new("invalid_file_path_characters"));
    }

    Ok(())
}
