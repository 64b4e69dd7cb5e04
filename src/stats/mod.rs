//! Streaks, points and leaderboard
//!
//! Gamification layer on top of quiz sessions. Two engines own all state:
//!
//! - [`StreakEngine`]: per-answer streak state machine plus quiz totals
//! - [`Leaderboard`]: ranked roster of every player seen on this store
//!
//! Both persist through a shared [`KeyValueStore`].
//!
//! # Data flow
//!
//! ```text
//! answer ──► StreakEngine::record_answer ──► quizStreakData
//!
//! quiz done ──► StreakEngine::record_quiz_outcome
//!                       │
//!                       ▼
//!               Leaderboard::upsert(player, snapshot) ──► quizLeaderboard
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let mut manager = GamificationManager::new(Arc::new(MemoryStore::new()));
//!
//! let outcome = manager.record_answer(true);
//! println!("{}", describe_streak(&outcome.state));
//!
//! let completion = manager.complete_quiz(true);
//! println!("Rank #{}", completion.rank);
//! ```

mod clock;
mod leaderboard;
mod messages;
mod player;
mod streaks;
mod transfer;

pub use clock::{Clock, FixedClock, SystemClock};
pub use leaderboard::{
    LEADERBOARD_KEY, Leaderboard, LeaderboardEntry, MAX_ENTRIES, PlayerSnapshot,
};
pub use messages::{describe_stats, describe_streak};
pub use player::{DEFAULT_PLAYER_NAME, PLAYER_KEY, PlayerProfile};
pub use streaks::{
    AnswerOutcome, POINTS_PER_STREAK_ANSWER, STREAK_KEY, STREAK_THRESHOLD, StreakEngine,
    StreakState, StreakTransition,
};
pub use transfer::{ImportError, REQUIRED_FIELDS, export_state, parse_import};

use std::sync::Arc;

use tracing::info;

use crate::store::KeyValueStore;

/// Result of finishing a quiz
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizCompletion {
    pub player: String,
    pub state: StreakState,
    /// Rank after the leaderboard update, 0 if not ranked
    pub rank: u32,
}

/// Wires the engines together the way a quiz session drives them
pub struct GamificationManager {
    streaks: StreakEngine,
    leaderboard: Leaderboard,
    profile: PlayerProfile,
}

impl GamificationManager {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            streaks: StreakEngine::with_clock(store.clone(), clock.clone()),
            leaderboard: Leaderboard::with_clock(store.clone(), clock),
            profile: PlayerProfile::new(store),
        }
    }

    pub fn streaks(&mut self) -> &mut StreakEngine {
        &mut self.streaks
    }

    pub fn leaderboard(&mut self) -> &mut Leaderboard {
        &mut self.leaderboard
    }

    pub fn profile(&self) -> &PlayerProfile {
        &self.profile
    }

    /// Feed one answer to the streak engine
    pub fn record_answer(&mut self, is_correct: bool) -> AnswerOutcome {
        self.streaks.record_answer(is_correct)
    }

    /// Count the finished quiz and publish the player's totals
    pub fn complete_quiz(&mut self, passed: bool) -> QuizCompletion {
        let state = self.streaks.record_quiz_outcome(passed);
        let player = self.profile.name();
        let rank = self
            .leaderboard
            .upsert(&player, PlayerSnapshot::from(&state));

        info!(player = %player, passed, rank, "Quiz completed");
        QuizCompletion {
            player,
            state,
            rank,
        }
    }

    /// Apply inactivity expiry if configured; returns whether it fired
    pub fn apply_expiry(&mut self, max_days_inactive: Option<u32>) -> bool {
        max_days_inactive.is_some_and(|days| self.streaks.expire_if_inactive(days))
    }

    /// Current player's rank, 0 if unranked
    pub fn current_rank(&mut self) -> u32 {
        let player = self.profile.name();
        self.leaderboard.rank(&player)
    }

    /// Streak line and totals line for the current state
    pub fn describe(&mut self) -> (String, String) {
        let state = self.streaks.load();
        (describe_streak(state), describe_stats(state))
    }

    /// Full account wipe of streak and point state
    pub fn reset_account(&mut self) -> StreakState {
        self.streaks.reset_all()
    }

    pub fn clear_leaderboard(&mut self) {
        self.leaderboard.clear();
    }
}
