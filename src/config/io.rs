//! Configuration file I/O operations

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use super::Config;

impl Config {
    /// Get the global config directory path (~/.quizstreak/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".quizstreak")
    }

    /// Get the global config file path (~/.quizstreak/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Persist the config as TOML.
    ///
    /// Writers are serialized through an exclusive lock on `<path>.lock`;
    /// the new content replaces the old file in a single rename.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        let _guard = ConfigLock::acquire(path)?;
        replace_file(path, content.as_bytes())
    }
}

/// Held for the duration of a config write; unlocks on drop
struct ConfigLock {
    file: File,
}

impl ConfigLock {
    fn acquire(config_path: &Path) -> Result<Self> {
        if let Some(dir) = config_path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        let lock_path = config_path.with_extension("toml.lock");
        let file = File::create(&lock_path)
            .with_context(|| format!("Failed to open {}", lock_path.display()))?;
        file.lock_exclusive()
            .with_context(|| format!("Failed to lock {}", lock_path.display()))?;
        Ok(Self { file })
    }
}

impl Drop for ConfigLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!("Failed to release config lock: {}", e);
        }
    }
}

/// Write `bytes` next to `path` and rename over it
fn replace_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let staging = path.with_extension("toml.tmp");
    {
        let mut file = File::create(&staging)
            .with_context(|| format!("Failed to create {}", staging.display()))?;
        file.write_all(bytes)
            .and_then(|()| file.sync_all())
            .with_context(|| format!("Failed to write {}", staging.display()))?;
    }
    std::fs::rename(&staging, path)
        .with_context(|| format!("Failed to move config into place: {}", path.display()))
}
