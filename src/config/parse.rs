//! Config file parsing.
//!
//! Every file is read as YAML, which also accepts JSON documents. Merge keys
//! (`<<: *anchor`) are expanded, and scalar mapping keys become strings.

use super::interpolate::interpolate;
use crate::error::{ConfigError, ConfigResult};
use serde_json::{Map, Value};
use serde_yaml::Value as YamlValue;
use std::collections::HashMap;
use std::path::Path;

/// Parse YAML (or JSON) text into a value tree.
///
/// An empty document yields `Value::Null`.
pub fn parse_str(path: &Path, content: &str) -> ConfigResult<Value> {
    if content.trim().is_empty() {
        return Ok(Value::Null);
    }
    let mut document =
        serde_yaml::from_str::<YamlValue>(content).map_err(|e| ConfigError::parse(path, e))?;
    document
        .apply_merge()
        .map_err(|e| ConfigError::parse(path, e))?;
    to_json(path, document)
}

/// Convert a YAML node into the value tree.
///
/// Tags are dropped, non-finite floats become `null`, and mapping keys must
/// be scalars.
fn to_json(path: &Path, node: YamlValue) -> ConfigResult<Value> {
    Ok(match node {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(b),
        YamlValue::Number(n) => {
            if let Some(u) = n.as_u64() {
                Value::from(u)
            } else if let Some(i) = n.as_i64() {
                Value::from(i)
            } else {
                n.as_f64().map_or(Value::Null, Value::from)
            }
        }
        YamlValue::String(s) => Value::String(s),
        YamlValue::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(|item| to_json(path, item))
                .collect::<ConfigResult<_>>()?,
        ),
        YamlValue::Mapping(mapping) => {
            let mut map = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                map.insert(key_string(path, key)?, to_json(path, value)?);
            }
            Value::Object(map)
        }
        YamlValue::Tagged(tagged) => to_json(path, tagged.value)?,
    })
}

fn key_string(path: &Path, key: YamlValue) -> ConfigResult<String> {
    match key {
        YamlValue::String(s) => Ok(s),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Bool(b) => Ok(b.to_string()),
        YamlValue::Null => Ok("null".to_string()),
        YamlValue::Tagged(tagged) => key_string(path, tagged.value),
        YamlValue::Sequence(_) | YamlValue::Mapping(_) => Err(ConfigError::parse(
            path,
            "mapping keys must be strings, numbers or booleans",
        )),
    }
}

/// Read and parse a config file.
pub fn parse_file(path: &Path) -> ConfigResult<Value> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read(path, e))?;
    parse_str(path, &content)
}

/// Read a config file, substitute `{ KEY }` placeholders, then parse it.
pub fn parse_file_with_vars(path: &Path, vars: &HashMap<String, String>) -> ConfigResult<Value> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read(path, e))?;
    parse_str(path, &interpolate(&content, vars))
}
