//! Deep merge functionality for parsed configuration trees.
//!
//! Implements field-by-field merging where later trees override earlier ones.
//! Arrays are replaced entirely, not concatenated.

use serde_json::{Map, Value};
use tracing::debug;

/// Deep merge two JSON values, with `overlay` taking precedence over `base`.
///
/// - Objects are merged recursively: keys in overlay override keys in base
/// - Arrays, strings, numbers, booleans and nulls replace the base value entirely
/// - Base key order is kept; keys only present in overlay are appended
///
/// # Example
/// ```
/// use serde_json::json;
/// use apprc::config::deep_merge;
///
/// let base = json!({
///     "server": { "port": 8080, "host": "localhost" },
///     "features": ["a", "b"]
/// });
/// let overlay = json!({
///     "server": { "port": 9000 },
///     "features": ["c"]
/// });
/// let result = deep_merge(base, overlay);
/// assert_eq!(
///     result,
///     json!({ "server": { "port": 9000, "host": "localhost" }, "features": ["c"] })
/// );
/// ```
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            merge_into(&mut base_map, overlay_map);
            Value::Object(base_map)
        }
        (_, overlay) => overlay,
    }
}

/// Merge `overlay` into `base` in place.
fn merge_into(base: &mut Map<String, Value>, overlay: Map<String, Value>) {
    for (key, overlay_value) in overlay {
        match base.get_mut(&key) {
            Some(base_value) => {
                let current = base_value.take();
                *base_value = deep_merge(current, overlay_value);
            }
            None => {
                base.insert(key, overlay_value);
            }
        }
    }
}

/// Merge multiple trees in order, with later trees taking precedence.
///
/// Folds from an empty mapping, so an empty input yields `{}`. A tree whose
/// top level is not a mapping has no keys to contribute and is skipped.
pub fn deep_merge_all(values: impl IntoIterator<Item = Value>) -> Value {
    Value::Object(merge_mappings(values))
}

/// Same fold as [`deep_merge_all`], returning the mapping itself.
pub(crate) fn merge_mappings(values: impl IntoIterator<Item = Value>) -> Map<String, Value> {
    let mut merged = Map::new();
    for value in values {
        match value {
            Value::Object(map) => merge_into(&mut merged, map),
            other => debug!(kind = value_kind(&other), "Skipping non-mapping document"),
        }
    }
    merged
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
