//! Environment selection.
//!
//! A merged tree carries a `defaults` section plus one section per
//! environment name. Selecting an environment deep-merges the named section
//! over `defaults`.

use super::merge::deep_merge_all;
use serde_json::{Map, Value};

/// Process variable consulted when no environment is given explicitly.
pub const ENV_VAR: &str = "NODE_ENV";

/// Environment used when neither an explicit name nor `NODE_ENV` is set.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Section merged underneath every named environment.
pub const DEFAULTS_KEY: &str = "defaults";

/// Which part of the merged tree to keep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// `defaults` overlaid with the named section.
    Named(String),
    /// The whole merged tree, every section included.
    All,
}

impl Environment {
    /// Pick the environment: explicit name, then `NODE_ENV`, then `development`.
    ///
    /// Empty strings count as unset.
    pub fn resolve(explicit: Option<&str>, node_env: Option<&str>) -> Self {
        let name = explicit
            .filter(|s| !s.is_empty())
            .or(node_env.filter(|s| !s.is_empty()))
            .unwrap_or(DEFAULT_ENVIRONMENT);
        Environment::Named(name.to_string())
    }

    /// The environment key, or `None` in whole-tree mode.
    pub fn key(&self) -> Option<&str> {
        match self {
            Environment::Named(name) => Some(name.as_str()),
            Environment::All => None,
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Named(DEFAULT_ENVIRONMENT.to_string())
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Named(name) => write!(f, "{}", name),
            Environment::All => write!(f, "<all>"),
        }
    }
}

/// Combine `defaults` with the section for `env_key`.
///
/// With no key the merged tree is returned unchanged. Missing sections, or
/// sections that are not mappings, count as empty.
pub fn select_environment(merged: Value, env_key: Option<&str>) -> Value {
    let Some(env_key) = env_key else {
        return merged;
    };

    let mut sections = match merged {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    let defaults = sections.remove(DEFAULTS_KEY).unwrap_or(Value::Null);
    let selected = sections.remove(env_key).unwrap_or(Value::Null);

    deep_merge_all([defaults, selected])
}
