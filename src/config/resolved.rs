//! The final, read-only configuration value.

use crate::error::{ConfigError, ConfigResult};
use crate::lookup::lookup;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Metadata key holding the application name.
pub const APP_NAME_KEY: &str = "appName";

/// Metadata key holding the list of files that were loaded.
pub const CONFIGS_KEY: &str = "configs";

/// An assembled configuration.
///
/// The tree is always a mapping and always carries `appName` and `configs`.
/// It is owned privately and only ever handed out by shared reference, so it
/// cannot change after construction; [`ResolvedConfig::try_insert`] exists for
/// callers that expect an assignment API and always fails.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    tree: Value,
    app_name: String,
    configs: Vec<PathBuf>,
}

impl ResolvedConfig {
    /// Freeze `tree`, overwriting its metadata keys.
    ///
    /// `configs` is written into the tree as lossy UTF-8 strings, so a
    /// non-UTF-8 path shows up altered in serialized output;
    /// [`ResolvedConfig::configs`] keeps the exact paths.
    pub(crate) fn new(tree: Map<String, Value>, app_name: String, configs: Vec<PathBuf>) -> Self {
        let mut tree = tree;
        tree.insert(APP_NAME_KEY.to_string(), Value::String(app_name.clone()));
        tree.insert(
            CONFIGS_KEY.to_string(),
            Value::Array(
                configs
                    .iter()
                    .map(|p| Value::String(p.to_string_lossy().into_owned()))
                    .collect(),
            ),
        );
        Self {
            tree: Value::Object(tree),
            app_name,
            configs,
        }
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Files merged into this config, lowest precedence first.
    ///
    /// Unlike the `configs` entry in the tree, these are the exact paths.
    pub fn configs(&self) -> &[PathBuf] {
        &self.configs
    }

    /// The whole tree, metadata included.
    pub fn as_value(&self) -> &Value {
        &self.tree
    }

    /// Look up a nested value; `None` when any segment is missing.
    pub fn get(&self, path: &str, delimiter: &str) -> Option<&Value> {
        lookup(&self.tree, path, delimiter)
    }

    /// Assignment is rejected at every depth; the config is left unchanged.
    pub fn try_insert(&self, path: &str, _value: Value) -> ConfigResult<()> {
        Err(ConfigError::frozen(path))
    }

    /// Copy the tree out for callers that need an owned, editable value.
    pub fn to_value(&self) -> Value {
        self.tree.clone()
    }
}

impl Serialize for ResolvedConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.tree.serialize(serializer)
    }
}

impl std::fmt::Display for ResolvedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tree)
    }
}

impl PartialEq<Value> for ResolvedConfig {
    fn eq(&self, other: &Value) -> bool {
        &self.tree == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resolved() -> ResolvedConfig {
        let tree = json!({
            "key": "value",
            "appName": "spoofed",
            "nested": {"inner": {"leaf": 1}}
        });
        let Value::Object(map) = tree else {
            unreachable!()
        };
        ResolvedConfig::new(map, "demo".into(), vec![PathBuf::from("/tmp/.demorc")])
    }

    #[test]
    fn test_metadata_overrides_file_values() {
        let cfg = resolved();
        assert_eq!(cfg.app_name(), "demo");
        assert_eq!(cfg.as_value()["appName"], json!("demo"));
        assert_eq!(cfg.as_value()["configs"], json!(["/tmp/.demorc"]));
    }

    #[test]
    fn test_metadata_keeps_existing_key_position() {
        let cfg = resolved();
        let keys: Vec<&str> = cfg
            .as_value()
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["key", "appName", "nested", "configs"]);
    }

    #[test]
    fn test_assignment_fails_at_any_depth() {
        let cfg = resolved();
        let before = cfg.to_value();

        let top = cfg.try_insert("key", json!("foo")).unwrap_err();
        assert!(matches!(top, ConfigError::Frozen { ref key } if key == "key"));
        let deep = cfg.try_insert("nested.inner.leaf", json!(2)).unwrap_err();
        assert!(matches!(deep, ConfigError::Frozen { .. }));

        assert_eq!(cfg, before);
    }

    #[test]
    fn test_get_and_display() {
        let cfg = resolved();
        assert_eq!(cfg.get("nested.inner.leaf", "."), Some(&json!(1)));
        assert_eq!(cfg.get("nested/missing", "/"), None);
        assert!(cfg.to_string().starts_with(r#"{"key":"value","appName":"demo""#));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_config_path_kept_exact() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = PathBuf::from(OsStr::from_bytes(b"/tmp/.demo\xffrc"));
        let cfg = ResolvedConfig::new(Map::new(), "demo".into(), vec![path.clone()]);

        assert_eq!(cfg.configs(), [path]);
        assert_eq!(cfg.as_value()["configs"], json!(["/tmp/.demo\u{FFFD}rc"]));
    }

    #[test]
    fn test_serialize_matches_tree() {
        let cfg = resolved();
        assert_eq!(serde_json::to_value(&cfg).unwrap(), cfg.to_value());
    }
}
