//! Configuration assembly.
//!
//! Discovers config files, parses and merges them, selects the environment
//! and layers caller defaults and metadata on top. Precedence, lowest first:
//! 1. **Defaults** - caller-supplied hardcoded values
//! 2. **Files** - every discovered file, in location order, reduced to the
//!    selected environment
//! 3. **Metadata** - `appName` and `configs`, always authoritative

use super::environment::{ENV_VAR, Environment, select_environment};
use super::files::filter_existing;
use super::merge::{deep_merge_all, merge_mappings};
use super::parse::{parse_file, parse_file_with_vars};
use super::resolved::ResolvedConfig;
use crate::error::{ConfigError, ConfigResult};
use crate::paths::{SearchRoots, find_closest, resolve_locations};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Marker file read for the application name.
pub const PACKAGE_MANIFEST: &str = "package.json";

/// Where to look for config files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Locations {
    /// Closest rc file plus the fixed home and system locations.
    #[default]
    Discover,
    /// Exactly these paths, in this order.
    Explicit(Vec<PathBuf>),
}

impl Locations {
    /// Parse a path list such as `./a.yml:/etc/demorc`.
    ///
    /// Entries are separated the way `PATH` is on this platform; empty
    /// entries are dropped.
    pub fn parse(list: &str) -> Self {
        Locations::Explicit(
            std::env::split_paths(list)
                .filter(|p| !p.as_os_str().is_empty())
                .collect(),
        )
    }
}

impl<P: Into<PathBuf>> From<Vec<P>> for Locations {
    fn from(paths: Vec<P>) -> Self {
        Locations::Explicit(paths.into_iter().map(Into::into).collect())
    }
}

/// Inputs to a single resolution.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Lowest-precedence values, overridden by anything in the files.
    pub defaults: Map<String, Value>,
    pub environment: Environment,
    /// Explicit app name; discovered from `package.json` when `None`.
    pub app_name: Option<String>,
    pub locations: Locations,
    pub roots: SearchRoots,
    /// Variables substituted into `{ KEY }` placeholders before parsing.
    pub interpolation: Option<HashMap<String, String>>,
}

impl LoadOptions {
    /// Options rooted at `cwd`, with the default environment.
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            defaults: Map::new(),
            environment: Environment::default(),
            app_name: None,
            locations: Locations::Discover,
            roots: SearchRoots::new(cwd),
            interpolation: None,
        }
    }

    /// Options read from the running process.
    ///
    /// This is the only place the working directory and `NODE_ENV` are read.
    pub fn from_process() -> ConfigResult<Self> {
        let cwd = std::env::current_dir().map_err(ConfigError::CurrentDir)?;
        let node_env = std::env::var(ENV_VAR).ok();
        Ok(Self::new(cwd).with_environment(Environment::resolve(None, node_env.as_deref())))
    }

    pub fn with_defaults(mut self, defaults: Map<String, Value>) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn with_locations(mut self, locations: Locations) -> Self {
        self.locations = locations;
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.roots.cwd = cwd.into();
        self
    }

    pub fn with_home(mut self, home: Option<PathBuf>) -> Self {
        self.roots.home = home;
        self
    }

    pub fn with_etc_dir(mut self, etc_dir: impl Into<PathBuf>) -> Self {
        self.roots.etc_dir = etc_dir.into();
        self
    }

    pub fn with_interpolation(mut self, vars: HashMap<String, String>) -> Self {
        self.interpolation = Some(vars);
        self
    }
}

/// Read the application name from the closest `package.json`.
pub fn discover_app_name(cwd: &Path) -> ConfigResult<String> {
    let Some(manifest) = find_closest(cwd, &[PACKAGE_MANIFEST]) else {
        return Err(ConfigError::AppNameUnknown {
            cwd: cwd.to_path_buf(),
        });
    };

    match parse_file(&manifest)? {
        Value::Object(map) => match map.get("name") {
            Some(Value::String(name)) if !name.is_empty() => {
                debug!(manifest = %manifest.display(), name = %name, "Discovered app name");
                Ok(name.clone())
            }
            _ => Err(ConfigError::AppNameUnknown {
                cwd: cwd.to_path_buf(),
            }),
        },
        _ => Err(ConfigError::NotAMapping { path: manifest }),
    }
}

/// Configuration loader that handles discovery and precedence.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Options the config was resolved with
    pub options: LoadOptions,
    /// Assembled configuration
    config: ResolvedConfig,
}

impl ConfigLoader {
    /// Resolve configuration with explicit options.
    pub fn load_with_options(options: LoadOptions) -> ConfigResult<Self> {
        let app_name = match options.app_name {
            Some(ref name) if !name.is_empty() => name.clone(),
            _ => discover_app_name(&options.roots.cwd)?,
        };
        info!(app = %app_name, environment = %options.environment, "Resolving configuration");

        let candidates = match options.locations {
            Locations::Discover => resolve_locations(&app_name, &options.roots),
            Locations::Explicit(ref paths) => paths.iter().cloned().map(Some).collect(),
        };
        let found = filter_existing(candidates);

        let mut documents = Vec::with_capacity(found.len());
        for path in &found {
            info!(path = %path.display(), "Loading config file");
            let document = match options.interpolation {
                Some(ref vars) => parse_file_with_vars(path, vars)?,
                None => parse_file(path)?,
            };
            documents.push(document);
        }

        let merged = deep_merge_all(documents);
        let selected = select_environment(merged, options.environment.key());
        let tree = merge_mappings([Value::Object(options.defaults.clone()), selected]);

        let config = ResolvedConfig::new(tree, app_name, found);
        Ok(Self { options, config })
    }

    /// Get the resolved configuration.
    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Consume the loader and return the configuration.
    pub fn into_config(self) -> ResolvedConfig {
        self.config
    }

    /// Get the files that were merged, lowest precedence first.
    pub fn config_paths(&self) -> &[PathBuf] {
        self.config.configs()
    }

    /// Get the environment the tree was reduced to.
    pub fn environment(&self) -> &Environment {
        &self.options.environment
    }
}

/// Resolve configuration in one call.
///
/// `environment` falls back to `NODE_ENV`, then `development`; `app_name` to
/// the closest `package.json`; `locations` to discovery.
pub fn load(
    defaults: Option<Map<String, Value>>,
    environment: Option<&str>,
    app_name: Option<&str>,
    locations: Option<Locations>,
) -> ConfigResult<ResolvedConfig> {
    let mut options = LoadOptions::from_process()?;
    if let Some(defaults) = defaults {
        options = options.with_defaults(defaults);
    }
    if let Some(env) = environment.filter(|e| !e.is_empty()) {
        options = options.with_environment(Environment::Named(env.to_string()));
    }
    if let Some(name) = app_name {
        options = options.with_app_name(name);
    }
    if let Some(locations) = locations {
        options = options.with_locations(locations);
    }
    ConfigLoader::load_with_options(options).map(ConfigLoader::into_config)
}
