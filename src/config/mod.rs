//! Layered configuration resolution.
//!
//! Files are discovered for an application name, parsed as YAML (JSON is
//! accepted too), deep-merged in location order and reduced to one
//! environment:
//! 1. **Closest rc** - `.{app}rc` in the working directory or an ancestor
//! 2. **Home** - `~/.{app}rc`, `~/{app}/config`, `~/.{app}/config`,
//!    `~/.config/{app}`, `~/.config/{app}/config`
//! 3. **System** - `/etc/{app}rc`, `/etc/{app}/config`
//!
//! Each location is also tried with `.yml`, `.yaml` and `.json` appended.
//!
//! ## Merge Strategy
//! - Mappings merge key by key, recursively
//! - Arrays and scalars are replaced wholesale by later files
//! - The selected environment section is merged over `defaults`
//!
//! ## Environment Variables
//! - `NODE_ENV` - Environment used when none is given (default: `development`)

mod environment;
mod files;
mod interpolate;
mod loader;
mod merge;
mod parse;
mod resolved;

pub use environment::{DEFAULT_ENVIRONMENT, DEFAULTS_KEY, ENV_VAR, Environment, select_environment};
pub use files::{SUFFIX_VARIANTS, filter_existing, probe_variants};
pub use interpolate::interpolate;
pub use loader::{ConfigLoader, LoadOptions, Locations, PACKAGE_MANIFEST, discover_app_name, load};
pub use merge::{deep_merge, deep_merge_all};
pub use parse::{parse_file, parse_str};
pub use resolved::{APP_NAME_KEY, CONFIGS_KEY, ResolvedConfig};
