//! Local leaderboard
//!
//! Keeps a ranked, capacity-bounded roster of players. Entries are ordered
//! by points, then longest streak, then quizzes passed (all descending).
//! Players tied on all three keep their previous relative order, so the
//! earlier arrival stays ahead.

use std::cmp::Reverse;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::clock::{Clock, SystemClock};
use super::streaks::StreakState;
use crate::store::KeyValueStore;

/// Store key for the roster
pub const LEADERBOARD_KEY: &str = "quizLeaderboard";

/// Maximum number of players kept
pub const MAX_ENTRIES: usize = 100;

/// Aggregate stats submitted for a player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerSnapshot {
    pub total_points: u32,
    pub longest_streak: u32,
    pub total_quizzes_passed: u32,
}

impl From<&StreakState> for PlayerSnapshot {
    fn from(state: &StreakState) -> Self {
        Self {
            total_points: state.total_points,
            longest_streak: state.longest_streak,
            total_quizzes_passed: state.total_quizzes_passed,
        }
    }
}

/// One ranked player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub player_name: String,
    #[serde(default)]
    pub total_points: u32,
    #[serde(default)]
    pub longest_streak: u32,
    #[serde(default)]
    pub total_quizzes_passed: u32,
    pub last_active: DateTime<Utc>,
    #[serde(default)]
    pub rank: u32,
}

impl LeaderboardEntry {
    fn sort_key(&self) -> Reverse<(u32, u32, u32)> {
        Reverse((
            self.total_points,
            self.longest_streak,
            self.total_quizzes_passed,
        ))
    }
}

/// Sort by the leaderboard order (stable), assign dense 1-based ranks and
/// drop everything past `capacity`
fn rank_entries(entries: &mut Vec<LeaderboardEntry>, capacity: usize) {
    entries.sort_by_key(LeaderboardEntry::sort_key);
    for (pos, entry) in entries.iter_mut().enumerate() {
        entry.rank = pos as u32 + 1;
    }
    entries.truncate(capacity);
}

/// Owns the roster cache and its persisted copy
pub struct Leaderboard {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    capacity: usize,
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let mut board = Self {
            store,
            clock,
            capacity: MAX_ENTRIES,
            entries: Vec::new(),
        };
        board.load();
        board
    }

    /// Refresh the cache from the store. Missing, unreadable or corrupt
    /// rosters load as empty.
    pub fn load(&mut self) -> &[LeaderboardEntry] {
        self.entries = match self.store.get(LEADERBOARD_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Corrupt leaderboard record, starting empty: {}", e);
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read leaderboard: {}", e);
                Vec::new()
            }
        };
        &self.entries
    }

    fn save(&self) {
        let json = match serde_json::to_string(&self.entries) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize leaderboard: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.set(LEADERBOARD_KEY, &json) {
            warn!("Failed to save leaderboard: {}", e);
        }
    }

    /// Insert or update `player_name` with fresh stats, re-rank and persist.
    ///
    /// Returns the player's new rank, or 0 if the name was blank or the
    /// player fell off the end of a full roster.
    pub fn upsert(&mut self, player_name: &str, stats: PlayerSnapshot) -> u32 {
        if player_name.trim().is_empty() {
            warn!("Ignoring leaderboard update with a blank player name");
            return 0;
        }

        self.load();
        let now = self.clock.now();

        match self
            .entries
            .iter()
            .position(|e| e.player_name == player_name)
        {
            Some(idx) => {
                let entry = &mut self.entries[idx];
                entry.total_points = stats.total_points;
                entry.longest_streak = stats.longest_streak;
                entry.total_quizzes_passed = stats.total_quizzes_passed;
                entry.last_active = now;
            }
            None => self.entries.push(LeaderboardEntry {
                player_name: player_name.to_string(),
                total_points: stats.total_points,
                longest_streak: stats.longest_streak,
                total_quizzes_passed: stats.total_quizzes_passed,
                last_active: now,
                rank: 0,
            }),
        }

        rank_entries(&mut self.entries, self.capacity);
        self.save();

        let rank = self.rank_in_cache(player_name);
        debug!(player = player_name, rank, "Leaderboard updated");
        rank
    }

    /// The first `limit` entries in rank order
    pub fn top_players(&mut self, limit: usize) -> Vec<LeaderboardEntry> {
        self.load();
        self.entries.iter().take(limit).cloned().collect()
    }

    /// Up to `range` entries ranked above `target_rank` plus up to `range`
    /// entries from `target_rank` downwards, clipped to the roster.
    ///
    /// An unranked player (`target_rank == 0`) gets the leading slice.
    pub fn players_around_rank(&mut self, target_rank: u32, range: usize) -> Vec<LeaderboardEntry> {
        self.load();
        let target = target_rank as usize;
        let start = target.saturating_sub(range.saturating_add(1));
        let end = target.saturating_add(range).min(self.entries.len());
        if start >= end {
            return Vec::new();
        }
        self.entries[start..end].to_vec()
    }

    /// Rank of `player_name`, or 0 if absent
    pub fn rank(&mut self, player_name: &str) -> u32 {
        self.load();
        self.rank_in_cache(player_name)
    }

    fn rank_in_cache(&self, player_name: &str) -> u32 {
        self.entries
            .iter()
            .find(|e| e.player_name == player_name)
            .map(|e| e.rank)
            .unwrap_or(0)
    }

    /// Number of ranked players
    pub fn len(&mut self) -> usize {
        self.load().len()
    }

    pub fn is_empty(&mut self) -> bool {
        self.len() == 0
    }

    /// Delete the whole roster
    pub fn clear(&mut self) {
        self.entries.clear();
        if let Err(e) = self.store.remove(LEADERBOARD_KEY) {
            warn!("Failed to clear leaderboard: {}", e);
        }
        info!("Leaderboard cleared");
    }
}
