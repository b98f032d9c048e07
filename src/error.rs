//! Error types for configuration resolution.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the resolution pipeline.
///
/// Every variant is fatal for the call that produced it: no partially
/// assembled configuration is ever returned alongside an error.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No app name was supplied and none could be read from a `package.json`.
    #[error(
        "could not determine the application name: pass one explicitly or add a \"name\" to a package.json in {} or one of its parents",
        .cwd.display()
    )]
    AppNameUnknown { cwd: PathBuf },

    #[error("could not read \"{}\": {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse file \"{}\": {}", .path.display(), .message)]
    Parse { path: PathBuf, message: String },

    #[error("expected a mapping at the top level of \"{}\"", .path.display())]
    NotAMapping { path: PathBuf },

    #[error("could not determine the current directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    /// Attempted mutation of a resolved (frozen) configuration.
    #[error("cannot assign to \"{key}\": resolved configuration is read-only")]
    Frozen { key: String },
}

impl ConfigError {
    pub fn parse(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::Parse {
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn frozen(key: impl Into<String>) -> Self {
        Self::Frozen { key: key.into() }
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
