//! apprc
//!
//! Prints a value from the application's resolved configuration.

use anyhow::{Context, Result};
use apprc::cli::Cli;
use apprc::config::{ConfigLoader, LoadOptions};
use apprc::format::{format_value, render};
use apprc::logging::{self, LogTarget};
use apprc::lookup::KeyPath;
use clap::Parser;
use std::io::Write;
use tracing::debug;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&LogTarget::parse(&cli.log), cli.verbose)?;

    let options = cli.load_options(LoadOptions::from_process()?);
    let loader = ConfigLoader::load_with_options(options)
        .context("apprc could not load configuration")?;
    let config = loader.config();
    debug!(
        files = config.configs().len(),
        environment = %loader.environment(),
        "Configuration resolved"
    );

    let output = match cli.key_path() {
        None => Some(format_value(config.as_value())),
        Some(path) => {
            let key_path = KeyPath::parse(path, &cli.delimiter);
            debug!(segments = ?key_path.segments(), "Looking up value");
            render(key_path.resolve(config.as_value()), path, &cli.missing_policy())?
        }
    };

    if let Some(text) = output {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
    }
    Ok(())
}
