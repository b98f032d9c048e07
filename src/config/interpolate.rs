//! `{ KEY }` placeholder substitution for raw config text.

use regex_lite::{NoExpand, Regex, escape};
use std::collections::HashMap;

/// Replace every `{ KEY }` placeholder in `text` with its value from `vars`.
///
/// Spaces inside the braces are optional and keys match case-insensitively.
/// Placeholders naming unknown keys are left untouched.
pub fn interpolate(text: &str, vars: &HashMap<String, String>) -> String {
    let mut keys: Vec<&String> = vars.keys().collect();
    // Stable output regardless of HashMap iteration order.
    keys.sort();

    let mut out = text.to_string();
    for key in keys {
        let pattern = format!(r"(?i)\{{ *{} *\}}", escape(key));
        let Ok(re) = Regex::new(&pattern) else {
            continue;
        };
        if re.is_match(&out) {
            out = re.replace_all(&out, NoExpand(&vars[key])).into_owned();
        }
    }
    out
}
