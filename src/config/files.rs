//! Existence filtering for candidate locations.
//!
//! Candidates may be suffix-less (`~/.demorc`); each is probed against the
//! suffix variants in order and the first regular file wins.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Suffixes probed for a candidate without a recognised extension.
pub const SUFFIX_VARIANTS: [&str; 4] = ["", ".yml", ".yaml", ".json"];

/// Extensions that mark a candidate as already carrying a format suffix.
const KNOWN_EXTENSIONS: [&str; 3] = ["yml", "yaml", "json"];

fn has_known_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| KNOWN_EXTENSIONS.contains(&ext))
}

/// Resolve one candidate to the first existing file among its variants.
pub fn probe_variants(candidate: &Path) -> Option<PathBuf> {
    if has_known_extension(candidate) {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    SUFFIX_VARIANTS.iter().find_map(|suffix| {
        let mut name = candidate.as_os_str().to_owned();
        name.push(suffix);
        let path = PathBuf::from(name);
        path.is_file().then_some(path)
    })
}

/// Keep only candidates that resolve to an existing file.
///
/// Order is preserved and each file is reported once, even when several
/// candidates (or a symlink) lead to it. `None` candidates are skipped.
pub fn filter_existing<I, P>(candidates: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = Option<P>>,
    P: AsRef<Path>,
{
    let mut seen = HashSet::new();
    let mut found = Vec::new();

    for candidate in candidates.into_iter().flatten() {
        let candidate = candidate.as_ref();
        let Some(path) = probe_variants(candidate) else {
            debug!(candidate = %candidate.display(), "No config file at candidate");
            continue;
        };

        let identity = std::fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
        if seen.insert(identity) {
            debug!(path = %path.display(), "Config file found");
            found.push(path);
        } else {
            debug!(path = %path.display(), "Config file already included");
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_probe_prefers_bare_name() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().join(".demorc");
        fs::write(&base, "a: 1").unwrap();
        fs::write(temp.path().join(".demorc.yml"), "a: 2").unwrap();

        assert_eq!(probe_variants(&base), Some(base));
    }

    #[test]
    fn test_probe_variant_order() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().join(".demorc");
        fs::write(temp.path().join(".demorc.json"), "{}").unwrap();
        fs::write(temp.path().join(".demorc.yaml"), "a: 1").unwrap();

        assert_eq!(
            probe_variants(&base),
            Some(temp.path().join(".demorc.yaml"))
        );
    }

    #[test]
    fn test_probe_explicit_suffix_is_taken_as_is() {
        let temp = TempDir::new().unwrap();
        let explicit = temp.path().join("settings.json");
        fs::write(temp.path().join("settings.json.yml"), "a: 1").unwrap();

        assert_eq!(probe_variants(&explicit), None);
    }

    #[test]
    fn test_probe_skips_directories() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("demo");
        fs::create_dir_all(&dir).unwrap();

        assert_eq!(probe_variants(&dir), None);
    }

    #[test]
    fn test_filter_existing_preserves_order_and_dedupes() {
        let temp = TempDir::new().unwrap();
        let first = temp.path().join("first");
        let second = temp.path().join("second.yml");
        fs::write(&first, "a: 1").unwrap();
        fs::write(&second, "a: 2").unwrap();

        let candidates = vec![
            Some(temp.path().join("second")),
            None,
            Some(temp.path().join("missing")),
            Some(first.clone()),
            Some(second.clone()),
        ];

        assert_eq!(filter_existing(candidates), vec![second, first]);
    }
}
