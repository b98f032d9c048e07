//! Output formatting for looked-up values.

use serde_json::Value;
use std::fmt;

/// What to do when the requested path is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissingPolicy {
    /// Text printed instead of the missing value.
    pub fallback: Option<String>,
    /// Print nothing and succeed.
    pub force: bool,
}

/// The requested path resolved to nothing and no policy covers it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingValue {
    pub path: String,
}

impl fmt::Display for MissingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "could not find \"{}\". Please make sure the value is defined in your configuration files or use --force to omit this error.",
            self.path
        )
    }
}

impl std::error::Error for MissingValue {}

/// Format a value for output.
///
/// Strings are printed verbatim; every other value as compact JSON.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Format a lookup result, applying `policy` when it is missing.
///
/// `Ok(None)` means print nothing and succeed.
pub fn render(
    value: Option<&Value>,
    path: &str,
    policy: &MissingPolicy,
) -> Result<Option<String>, MissingValue> {
    match value {
        Some(value) => Ok(Some(format_value(value))),
        None => match policy.fallback {
            Some(ref fallback) => Ok(Some(fallback.clone())),
            None if policy.force => Ok(None),
            None => Err(MissingValue {
                path: path.to_string(),
            }),
        },
    }
}
