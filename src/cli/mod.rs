//! CLI command implementations

pub mod admin;
pub mod init;
pub mod leaderboard;
pub mod play;
pub mod player;
pub mod stats;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use quizstreak::config::Config;
use quizstreak::stats::GamificationManager;
use quizstreak::store::SqliteStore;

/// Resolved config plus the store every command works against
pub struct AppContext {
    pub config: Config,
    pub config_path: PathBuf,
    pub data_path: PathBuf,
}

impl AppContext {
    pub fn load(config_path: Option<PathBuf>, data_path: Option<PathBuf>) -> Result<Self> {
        let config_path = config_path.unwrap_or_else(Config::global_config_path);
        let config = Config::load_or_default(&config_path)?;
        let data_path = data_path.unwrap_or_else(|| config.data_path());
        Ok(Self {
            config,
            config_path,
            data_path,
        })
    }

    /// Open the data store and apply configured streak expiry
    pub fn manager(&self) -> Result<GamificationManager> {
        let store = open_store(&self.data_path)?;
        let mut manager = GamificationManager::new(Arc::new(store));
        if manager.apply_expiry(self.config.settings.streak_expiry_days) {
            tracing::info!("Current streak expired after inactivity");
        }
        Ok(manager)
    }
}

fn open_store(path: &Path) -> Result<SqliteStore> {
    SqliteStore::open(path)
        .with_context(|| format!("Failed to open data store: {}", path.display()))
}
