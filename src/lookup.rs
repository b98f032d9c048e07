//! Path lookup into a value tree.
//!
//! Paths are delimiter-separated keys with optional bracket syntax:
//! `server.hosts[0]`, `nested/even/deeper` (delimiter `/`) or
//! `nested[even]@yolo@value` (delimiter `@`). Numeric segments index arrays.

use serde_json::Value;

/// Default path segment delimiter.
pub const DEFAULT_DELIMITER: &str = ".";

/// A parsed lookup path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// Split `path` into segments.
    ///
    /// `[` is treated as another delimiter and `]` is dropped, then a single
    /// leading delimiter is stripped. An empty delimiter leaves the whole path
    /// as one segment.
    pub fn parse(path: &str, delimiter: &str) -> Self {
        if delimiter.is_empty() {
            return Self {
                segments: vec![path.replace(['[', ']'], "")],
            };
        }

        let normalized = path.replace('[', delimiter).replace(']', "");
        let trimmed = normalized.strip_prefix(delimiter).unwrap_or(&normalized);
        Self {
            segments: trimmed.split(delimiter).map(str::to_string).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Walk `root` segment by segment.
    ///
    /// Returns `None` as soon as a segment is missing; never fails mid-walk.
    pub fn resolve<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(root, |value, segment| step(value, segment))
    }
}

/// Descend one level.
fn step<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => None,
    }
}

/// Look up `path` in `root` using `delimiter` to separate segments.
pub fn lookup<'a>(root: &'a Value, path: &str, delimiter: &str) -> Option<&'a Value> {
    KeyPath::parse(path, delimiter).resolve(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> Value {
        json!({
            "key": "value",
            "nested": {
                "even": {"deeper": "X", "yolo": {"value": "found"}},
                "array": [1, 2, "foo"],
                "objects": [{"name": "first"}, {"name": "second"}]
            },
            "numbers": {"0": "zero"}
        })
    }

    #[test]
    fn test_parse_dotted() {
        assert_eq!(
            KeyPath::parse("a.b.c", ".").segments(),
            ["a", "b", "c"]
        );
    }

    #[test]
    fn test_parse_brackets_with_custom_delimiter() {
        assert_eq!(
            KeyPath::parse("nested[even]@yolo@value", "@").segments(),
            ["nested", "even", "yolo", "value"]
        );
    }

    #[test]
    fn test_parse_strips_leading_delimiter() {
        assert_eq!(KeyPath::parse(".a.b", ".").segments(), ["a", "b"]);
        assert_eq!(KeyPath::parse("[a][b]", ".").segments(), ["a", "b"]);
    }

    #[test]
    fn test_parse_multichar_delimiter() {
        assert_eq!(KeyPath::parse("a::b[c]", "::").segments(), ["a", "b", "c"]);
    }

    #[test]
    fn test_lookup_custom_delimiter() {
        let config = config();
        assert_eq!(
            lookup(&config, "nested/even/deeper", "/"),
            Some(&json!("X"))
        );
        assert_eq!(
            lookup(&config, "nested[even]@yolo@value", "@"),
            Some(&json!("found"))
        );
    }

    #[test]
    fn test_lookup_array_index() {
        let config = config();
        assert_eq!(lookup(&config, "nested.array.0", "."), Some(&json!(1)));
        assert_eq!(lookup(&config, "nested[array]@1", "@"), Some(&json!(2)));
        assert_eq!(lookup(&config, "nested.array[2]", "."), Some(&json!("foo")));
        assert_eq!(
            lookup(&config, "nested.objects.1.name", "."),
            Some(&json!("second"))
        );
        assert_eq!(lookup(&config, "nested.array.3", "."), None);
        assert_eq!(lookup(&config, "nested.array.first", "."), None);
    }

    #[test]
    fn test_numeric_segment_on_mapping_is_a_key() {
        let config = config();
        assert_eq!(lookup(&config, "numbers.0", "."), Some(&json!("zero")));
    }

    #[test]
    fn test_missing_short_circuits() {
        let config = config();
        assert_eq!(lookup(&config, "missing.deeper.still", "."), None);
        assert_eq!(lookup(&config, "key.length", "."), None);
    }

    #[test]
    fn test_lookup_whole_object() {
        let config = config();
        assert_eq!(
            lookup(&config, "nested.even", "."),
            Some(&json!({"deeper": "X", "yolo": {"value": "found"}}))
        );
    }
}
