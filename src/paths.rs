//! Candidate location resolution.
//!
//! Builds the ordered list of places an application's configuration may
//! live, lowest precedence first:
//! - the closest `.{app}rc` found walking up from the working directory
//! - `~/.{app}rc`, `~/{app}/config`, `~/.{app}/config`
//! - `~/.config/{app}`, `~/.config/{app}/config`
//! - `/etc/{app}rc`, `/etc/{app}/config`
//!
//! Nothing here reads file contents; existence is confirmed later by
//! [`crate::config::filter_existing`].

use crate::config::SUFFIX_VARIANTS;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default system-wide configuration directory.
pub const DEFAULT_ETC_DIR: &str = "/etc";

/// Roots the resolver builds paths from.
#[derive(Debug, Clone)]
pub struct SearchRoots {
    /// Directory the closest-ancestor search starts from.
    pub cwd: PathBuf,
    /// Home directory, if the platform has one.
    pub home: Option<PathBuf>,
    /// System-wide configuration directory (`/etc`).
    pub etc_dir: PathBuf,
}

impl SearchRoots {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            home: dirs::home_dir(),
            etc_dir: PathBuf::from(DEFAULT_ETC_DIR),
        }
    }

    pub fn with_home(mut self, home: Option<PathBuf>) -> Self {
        self.home = home;
        self
    }

    pub fn with_etc_dir(mut self, etc_dir: impl Into<PathBuf>) -> Self {
        self.etc_dir = etc_dir.into();
        self
    }
}

/// Walk from `start` up to the filesystem root looking for any of `names`.
///
/// Within a directory the names are tried in order; the first regular file
/// wins. Returns `None` when no ancestor (root included) holds a match.
pub fn find_closest<S: AsRef<Path>>(start: &Path, names: &[S]) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        for name in names {
            let candidate = dir.join(name);
            if candidate.is_file() {
                debug!(path = %candidate.display(), "Found closest file");
                return Some(candidate);
            }
        }
        current = dir.parent();
    }
    None
}

/// File names `base` may appear under, one per suffix variant.
fn with_suffixes(base: &str) -> Vec<OsString> {
    SUFFIX_VARIANTS
        .iter()
        .map(|suffix| OsString::from(format!("{base}{suffix}")))
        .collect()
}

/// Build the ordered candidate list for `app_name`.
///
/// The first entry is the closest-ancestor rc file, which is `None` when the
/// upward search found nothing. Later entries may or may not exist.
pub fn resolve_locations(app_name: &str, roots: &SearchRoots) -> Vec<Option<PathBuf>> {
    let rc_name = format!(".{app_name}rc");
    let mut locations = vec![find_closest(&roots.cwd, &with_suffixes(&rc_name))];

    match roots.home {
        Some(ref home) => {
            locations.push(Some(home.join(&rc_name)));
            locations.push(Some(home.join(app_name).join("config")));
            locations.push(Some(home.join(format!(".{app_name}")).join("config")));
            locations.push(Some(home.join(".config").join(app_name)));
            locations.push(Some(home.join(".config").join(app_name).join("config")));
        }
        None => warn!("No home directory available, skipping home config locations"),
    }

    locations.push(Some(roots.etc_dir.join(format!("{app_name}rc"))));
    locations.push(Some(roots.etc_dir.join(app_name).join("config")));

    locations
}
