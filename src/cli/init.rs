//! Init command implementation

use anyhow::{Result, bail};
use std::path::Path;
use tracing::info;

use quizstreak::config::Config;

/// Write a default config file
pub fn init_command(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Config already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    Config::default().save_to_file(config_path)?;
    info!("Wrote default config to {}", config_path.display());
    println!("Created {}", config_path.display());
    Ok(())
}
