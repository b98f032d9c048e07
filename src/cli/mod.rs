//! CLI definitions for apprc
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct.

use crate::config::{Environment, LoadOptions, Locations};
use crate::format::MissingPolicy;
use crate::lookup::DEFAULT_DELIMITER;
use clap::Parser;
use clap::builder::NonEmptyStringValueParser;
use std::collections::HashMap;

/// Print a value from the resolved application configuration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path of the value to print, e.g. `server.port` or `hosts[0]`.
    /// Prints the whole configuration as JSON when omitted.
    pub path: Option<String>,

    /// Environment section to select
    #[arg(short, long, required_unless_present = "all_environments")]
    pub env: Option<String>,

    /// Keep every environment section instead of selecting one
    #[arg(short, long, conflicts_with = "env")]
    pub all_environments: bool,

    /// Application name (default: "name" in the closest package.json)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Don't bail on a missing value
    #[arg(short, long)]
    pub force: bool,

    /// Fallback output for a missing value
    #[arg(short, long, value_name = "TEXT")]
    pub undefined: Option<String>,

    /// Custom path delimiter
    #[arg(short, long, default_value = DEFAULT_DELIMITER, value_parser = NonEmptyStringValueParser::new())]
    pub delimiter: String,

    /// Explicit config files to merge instead of the discovered ones,
    /// separated like PATH entries
    #[arg(short, long, value_name = "LIST")]
    pub locations: Option<String>,

    /// Substitute `{ VAR }` placeholders in config files with environment variables
    #[arg(short, long)]
    pub interpolate: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Logging output: 0/off, 2/stderr (default), or filename
    #[arg(long, default_value = "2")]
    pub log: String,
}

impl Cli {
    /// Environment selected by the flags.
    pub fn environment(&self) -> Environment {
        match self.env {
            Some(ref env) if !self.all_environments => Environment::Named(env.clone()),
            _ => Environment::All,
        }
    }

    /// Apply the flags on top of process-derived options.
    pub fn load_options(&self, base: LoadOptions) -> LoadOptions {
        let mut options = base.with_environment(self.environment());
        if let Some(ref name) = self.name {
            options = options.with_app_name(name);
        }
        if let Some(ref list) = self.locations {
            options = options.with_locations(Locations::parse(list));
        }
        if self.interpolate {
            options = options.with_interpolation(std::env::vars().collect::<HashMap<_, _>>());
        }
        options
    }

    /// How a missing value is reported.
    pub fn missing_policy(&self) -> MissingPolicy {
        MissingPolicy {
            fallback: self.undefined.clone(),
            force: self.force,
        }
    }

    /// The lookup path, treating an empty argument as absent.
    pub fn key_path(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| !p.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_env_is_required() {
        assert!(Cli::try_parse_from(["apprc", "key"]).is_err());
        assert!(Cli::try_parse_from(["apprc", "key", "-e", "production"]).is_ok());
        assert!(Cli::try_parse_from(["apprc", "key", "--all-environments"]).is_ok());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["apprc", "--env", "test"]).unwrap();
        assert_eq!(cli.delimiter, ".");
        assert_eq!(cli.key_path(), None);
        assert_eq!(cli.environment(), Environment::Named("test".into()));
        assert!(!cli.force);
        assert_eq!(cli.log, "2");
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from([
            "apprc", "a@b", "-e", "prod", "-n", "demo", "-f", "-u", "none", "-d", "@",
        ])
        .unwrap();
        assert_eq!(cli.key_path(), Some("a@b"));
        assert_eq!(cli.name.as_deref(), Some("demo"));
        assert_eq!(cli.delimiter, "@");
        let policy = cli.missing_policy();
        assert!(policy.force);
        assert_eq!(policy.fallback.as_deref(), Some("none"));
    }

    #[test]
    fn test_empty_delimiter_rejected() {
        assert!(Cli::try_parse_from(["apprc", "-e", "dev", "-d", ""]).is_err());
    }

    #[test]
    fn test_all_environments_conflicts_with_env() {
        assert!(Cli::try_parse_from(["apprc", "-e", "dev", "-a"]).is_err());
    }
}
