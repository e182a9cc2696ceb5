//! Convenience macros for error handling and propagation

/// Equivalent to `anyhow::bail!` but for `LeadboardError`
///
/// A leading `kind:` selects one of the `LeadboardError` constructors
/// (`config`, `validation`, `aggregation`, `source_failure`); without it a
/// generic error is returned.
///
/// # Examples
///
/// ```rust
/// use leadboard_common::bail;
/// use leadboard_common::Result;
///
/// fn check_limit(limit: usize) -> Result<()> {
///     if limit == 0 {
///         bail!(validation: "limit must be positive, got {}", limit);
///     }
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! bail {
    ($kind:ident : $fmt:literal $(, $arg:expr)* $(,)?) => {
        return Err($crate::LeadboardError::$kind(format!($fmt $(, $arg)*)))
    };
    ($msg:literal $(,)?) => {
        return Err($crate::LeadboardError::new($msg))
    };
    ($err:expr $(,)?) => {
        return Err($crate::LeadboardError::new($err))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::LeadboardError::new(format!($fmt, $($arg)*)))
    };
}

/// Equivalent to `anyhow::ensure!` but for `LeadboardError`
///
/// # Examples
///
/// ```rust
/// use leadboard_common::ensure;
/// use leadboard_common::Result;
///
/// fn validate_index(index: usize, len: usize) -> Result<()> {
///     ensure!(index < len, aggregation: "index {} out of bounds for {} nodes", index, len);
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $kind:ident : $fmt:literal $(, $arg:expr)* $(,)?) => {
        if !$cond {
            return Err($crate::LeadboardError::$kind(format!($fmt $(, $arg)*)));
        }
    };
    ($cond:expr, $msg:literal $(,)?) => {
        if !$cond {
            return Err($crate::LeadboardError::new($msg));
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !$cond {
            return Err($crate::LeadboardError::new(format!($fmt, $($arg)*)));
        }
    };
}

/// Add context to an error while preserving the error chain
///
/// # Examples
///
/// ```rust
/// use leadboard_common::{with_context, Result};
///
/// fn read_export() -> Result<String> {
///     std::fs::read_to_string("leads.json")
///         .map_err(|e| with_context!(e, "Failed to read lead export"))
/// }
/// ```
#[macro_export]
macro_rules! with_context {
    ($err:expr, $msg:literal $(,)?) => {
        $crate::LeadboardError::with_source($msg, $err)
    };
    ($err:expr, $fmt:expr, $($arg:tt)*) => {
        $crate::LeadboardError::with_source(format!($fmt, $($arg)*), $err)
    };
}
