//! apprc Library
//!
//! Resolves application configuration from rc files across the working
//! directory's ancestors, the home directory and `/etc`, and looks values up
//! by path.

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod lookup;
pub mod paths;

pub use config::{ConfigLoader, Environment, LoadOptions, Locations, ResolvedConfig, load};
pub use error::{ConfigError, ConfigResult};
