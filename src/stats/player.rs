//! Player identity record

use std::sync::Arc;

use tracing::{info, warn};

use crate::store::KeyValueStore;

/// Store key for the player name
pub const PLAYER_KEY: &str = "quizPlayerName";

/// Name used until the player picks one
pub const DEFAULT_PLAYER_NAME: &str = "Anonymous Player";

/// Reads and writes the name the leaderboard files results under
#[derive(Clone)]
pub struct PlayerProfile {
    store: Arc<dyn KeyValueStore>,
}

impl PlayerProfile {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Current player name, [`DEFAULT_PLAYER_NAME`] if unset or unreadable
    pub fn name(&self) -> String {
        match self.store.get(PLAYER_KEY) {
            Ok(Some(name)) if !name.trim().is_empty() => name,
            Ok(_) => DEFAULT_PLAYER_NAME.to_string(),
            Err(e) => {
                warn!("Failed to read player name: {}", e);
                DEFAULT_PLAYER_NAME.to_string()
            }
        }
    }

    /// Store a new name (trimmed). A blank name clears the record.
    pub fn set_name(&self, name: &str) -> String {
        let name = name.trim();
        let result = if name.is_empty() {
            self.store.remove(PLAYER_KEY)
        } else {
            self.store.set(PLAYER_KEY, name)
        };
        if let Err(e) = result {
            warn!("Failed to save player name: {}", e);
        }
        let current = self.name();
        info!(player = %current, "Player name set");
        current
    }
}
