//! Configuration loading and management

mod io;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub settings: Settings,
}

/// General settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Location of the SQLite data file (defaults to ~/.quizstreak/data.db)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_path: Option<PathBuf>,

    /// Shared passphrase for admin commands
    #[serde(default = "default_admin_passphrase")]
    pub admin_passphrase: String,

    /// Days without a finished quiz before the current streak is dropped.
    /// Unset disables expiry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streak_expiry_days: Option<u32>,

    /// Rows shown by `leaderboard` without --limit
    #[serde(default = "default_leaderboard_limit")]
    pub leaderboard_limit: usize,

    /// Neighbours shown on each side by `leaderboard --around`
    #[serde(default = "default_around_range")]
    pub around_range: usize,
}

fn default_admin_passphrase() -> String {
    "admin".to_string()
}

fn default_leaderboard_limit() -> usize {
    10
}

fn default_around_range() -> usize {
    2
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: None,
            admin_passphrase: default_admin_passphrase(),
            streak_expiry_days: None,
            leaderboard_limit: default_leaderboard_limit(),
            around_range: default_around_range(),
        }
    }
}

impl Config {
    /// Resolved data file location
    pub fn data_path(&self) -> PathBuf {
        self.settings
            .data_path
            .clone()
            .unwrap_or_else(|| Self::global_config_dir().join("data.db"))
    }

    /// Whether `candidate` unlocks admin commands
    pub fn check_passphrase(&self, candidate: &str) -> bool {
        !self.settings.admin_passphrase.is_empty() && candidate == self.settings.admin_passphrase
    }
}
