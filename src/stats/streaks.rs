//! Answer streak tracking
//!
//! Converts a stream of correct/incorrect answers into streak state and
//! points. A streak activates after [`STREAK_THRESHOLD`] consecutive
//! correct answers; from then on every correct answer (the activating one
//! included) earns one point. A single incorrect answer ends the streak.
//!
//! State is persisted under [`STREAK_KEY`] after every mutation. Storage
//! failures are logged and swallowed: losing gamification state must never
//! block quiz-taking.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::clock::{Clock, SystemClock};
use crate::store::KeyValueStore;

/// Store key for the streak record
pub const STREAK_KEY: &str = "quizStreakData";

/// Consecutive correct answers needed before a streak becomes active
pub const STREAK_THRESHOLD: u32 = 3;

/// Points awarded per correct answer while a streak is active
pub const POINTS_PER_STREAK_ANSWER: u32 = 1;

/// Streak and point totals for one player
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakState {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_quiz_date: Option<DateTime<Utc>>,
    pub total_quizzes_passed: u32,
    pub total_quizzes_taken: u32,
    pub total_points: u32,
    #[serde(rename = "consecutiveCorrectAnswers")]
    pub consecutive_correct: u32,
    pub is_in_streak: bool,
}

/// Persisted shape of [`StreakState`]. Every field is optional so records
/// written by older builds (or by hand) still load.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct StoredStreakRecord {
    pub current_streak: Option<u32>,
    pub longest_streak: Option<u32>,
    pub last_quiz_date: Option<DateTime<Utc>>,
    pub total_quizzes_passed: Option<u32>,
    pub total_quizzes_taken: Option<u32>,
    pub total_points: Option<u32>,
    pub consecutive_correct_answers: Option<u32>,
    pub is_in_streak: Option<bool>,
}

impl StoredStreakRecord {
    /// Fill defaults and clamp counters that would otherwise break the
    /// record invariants.
    ///
    /// A non-zero `current_streak` is always an active streak whose run
    /// length is the streak itself. An active record with `current_streak`
    /// at 0 is an expired streak and keeps its stored run untouched.
    pub(crate) fn normalize(self) -> StreakState {
        let current_streak = self.current_streak.unwrap_or(0);
        let total_quizzes_taken = self.total_quizzes_taken.unwrap_or(0);
        let is_in_streak = self.is_in_streak.unwrap_or(false) || current_streak > 0;
        let stored_run = self.consecutive_correct_answers.unwrap_or(0);
        let consecutive_correct = if current_streak > 0 {
            current_streak
        } else if is_in_streak {
            stored_run
        } else {
            stored_run.min(STREAK_THRESHOLD - 1)
        };

        StreakState {
            current_streak,
            longest_streak: self.longest_streak.unwrap_or(0).max(current_streak),
            last_quiz_date: self.last_quiz_date,
            total_quizzes_passed: self
                .total_quizzes_passed
                .unwrap_or(0)
                .min(total_quizzes_taken),
            total_quizzes_taken,
            total_points: self.total_points.unwrap_or(0),
            consecutive_correct,
            is_in_streak,
        }
    }
}

impl StreakState {
    /// Parse a persisted record, `None` if it is not valid JSON of the
    /// expected shape
    pub(crate) fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str::<StoredStreakRecord>(raw)
            .map(StoredStreakRecord::normalize)
            .ok()
    }

    /// Percentage of taken quizzes that were passed, rounded half up.
    /// Zero when no quiz has been taken.
    pub fn pass_rate(&self) -> u32 {
        if self.total_quizzes_taken == 0 {
            return 0;
        }
        let passed = u64::from(self.total_quizzes_passed);
        let taken = u64::from(self.total_quizzes_taken);
        ((200 * passed + taken) / (2 * taken)) as u32
    }

    /// Correct answers still needed before a streak activates
    pub fn answers_until_streak(&self) -> u32 {
        if self.is_in_streak {
            0
        } else {
            STREAK_THRESHOLD.saturating_sub(self.consecutive_correct)
        }
    }
}

/// What a single answer did to the streak
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakTransition {
    /// Correct answer, still below the activation threshold
    Building { consecutive: u32 },
    /// Correct answer that reached the threshold
    Activated { streak: u32 },
    /// Correct answer during an active streak
    Extended { streak: u32 },
    /// Incorrect answer that ended an active streak
    Broken { lost: u32 },
    /// Incorrect answer with no active streak
    Unchanged,
}

/// Result of [`StreakEngine::record_answer`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub state: StreakState,
    /// Always 0 or [`POINTS_PER_STREAK_ANSWER`]
    pub points_earned: u32,
    pub transition: StreakTransition,
}

/// Owns one player's [`StreakState`] and keeps it in sync with the store
pub struct StreakEngine {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    state: StreakState,
}

impl StreakEngine {
    /// Create an engine using the wall clock
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    /// Create an engine with a custom time source
    pub fn with_clock(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let mut engine = Self {
            store,
            clock,
            state: StreakState::default(),
        };
        engine.load();
        engine
    }

    /// Snapshot of the cached state
    pub fn state(&self) -> &StreakState {
        &self.state
    }

    /// Refresh the cache from the store. Absent, unreadable or corrupt
    /// records yield the all-zero default.
    pub fn load(&mut self) -> &StreakState {
        self.state = match self.store.get(STREAK_KEY) {
            Ok(Some(raw)) => StreakState::from_json(&raw).unwrap_or_else(|| {
                warn!("Corrupt streak record, starting from defaults");
                StreakState::default()
            }),
            Ok(None) => StreakState::default(),
            Err(e) => {
                warn!("Failed to read streak record: {}", e);
                StreakState::default()
            }
        };
        &self.state
    }

    /// Write the cached state to the store
    fn save(&self) {
        let json = match serde_json::to_string(&self.state) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize streak record: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.set(STREAK_KEY, &json) {
            warn!("Failed to save streak record: {}", e);
        }
    }

    /// Feed one answer through the streak state machine
    pub fn record_answer(&mut self, is_correct: bool) -> AnswerOutcome {
        self.load();
        let state = &mut self.state;

        let (points_earned, transition) = if is_correct {
            state.consecutive_correct = state.consecutive_correct.saturating_add(1);

            if state.consecutive_correct >= STREAK_THRESHOLD {
                let activated = !state.is_in_streak;
                state.is_in_streak = true;
                state.current_streak = state.consecutive_correct;
                state.total_points = state.total_points.saturating_add(POINTS_PER_STREAK_ANSWER);
                state.longest_streak = state.longest_streak.max(state.current_streak);

                let streak = state.current_streak;
                let transition = if activated {
                    StreakTransition::Activated { streak }
                } else {
                    StreakTransition::Extended { streak }
                };
                (POINTS_PER_STREAK_ANSWER, transition)
            } else {
                (
                    0,
                    StreakTransition::Building {
                        consecutive: state.consecutive_correct,
                    },
                )
            }
        } else {
            let transition = if state.is_in_streak {
                StreakTransition::Broken {
                    lost: state.current_streak,
                }
            } else {
                StreakTransition::Unchanged
            };
            state.consecutive_correct = 0;
            state.current_streak = 0;
            state.is_in_streak = false;
            (0, transition)
        };

        debug!(?transition, points_earned, "Recorded answer");
        self.save();

        AnswerOutcome {
            state: self.state.clone(),
            points_earned,
            transition,
        }
    }

    /// Count a finished quiz. Streak fields are left alone.
    pub fn record_quiz_outcome(&mut self, passed: bool) -> StreakState {
        self.load();
        self.state.total_quizzes_taken = self.state.total_quizzes_taken.saturating_add(1);
        if passed {
            self.state.total_quizzes_passed = self
                .state
                .total_quizzes_passed
                .saturating_add(1)
                .min(self.state.total_quizzes_taken);
        }
        self.state.last_quiz_date = Some(self.clock.now());

        debug!(
            passed,
            taken = self.state.total_quizzes_taken,
            "Recorded quiz outcome"
        );
        self.save();
        self.state.clone()
    }

    /// Wipe everything back to the all-zero default
    pub fn reset_all(&mut self) -> StreakState {
        self.state = StreakState::default();
        self.save();
        info!("Streak state reset");
        self.state.clone()
    }

    /// Zero `current_streak` if the last quiz is more than
    /// `max_days_inactive` whole days ago. Returns whether it expired.
    ///
    /// Only `current_streak` is cleared. `consecutive_correct` and
    /// `is_in_streak` keep their values, so the next correct answer resumes
    /// counting from the old run.
    pub fn expire_if_inactive(&mut self, max_days_inactive: u32) -> bool {
        self.load();
        if self.state.current_streak == 0 {
            return false;
        }
        let Some(last) = self.state.last_quiz_date else {
            return false;
        };

        let days_since = (self.clock.now() - last).num_days();
        if days_since <= i64::from(max_days_inactive) {
            return false;
        }

        info!(
            days_since,
            streak = self.state.current_streak,
            "Streak expired after inactivity"
        );
        self.state.current_streak = 0;
        self.save();
        true
    }

    /// Replace the whole record (used by import). Persists immediately.
    pub(crate) fn replace(&mut self, state: StreakState) -> StreakState {
        self.state = state;
        self.save();
        self.state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::clock::FixedClock;
    use crate::store::{FailingStore, MemoryStore};
    use chrono::{Duration, TimeZone};

    fn engine() -> (StreakEngine, MemoryStore) {
        let store = MemoryStore::new();
        (StreakEngine::new(Arc::new(store.clone())), store)
    }

    fn at(days: i64) -> Arc<dyn Clock> {
        let base = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        Arc::new(FixedClock(base + Duration::days(days)))
    }

    #[test]
    fn test_answer_sequence_scenario() {
        let (mut engine, _) = engine();

        let first = engine.record_answer(true);
        assert_eq!(first.transition, StreakTransition::Building { consecutive: 1 });
        engine.record_answer(true);

        let third = engine.record_answer(true);
        assert!(third.state.is_in_streak);
        assert_eq!(third.state.current_streak, 3);
        assert_eq!(third.state.total_points, 1);
        assert_eq!(third.points_earned, 1);
        assert_eq!(third.transition, StreakTransition::Activated { streak: 3 });

        let fourth = engine.record_answer(true);
        assert_eq!(fourth.state.current_streak, 4);
        assert_eq!(fourth.state.total_points, 2);
        assert_eq!(fourth.transition, StreakTransition::Extended { streak: 4 });

        let fifth = engine.record_answer(false);
        assert_eq!(fifth.state.current_streak, 0);
        assert!(!fifth.state.is_in_streak);
        assert_eq!(fifth.state.total_points, 2);
        assert_eq!(fifth.points_earned, 0);
        assert_eq!(fifth.transition, StreakTransition::Broken { lost: 4 });
    }

    #[test]
    fn test_two_correct_answers_do_not_activate() {
        let (mut engine, _) = engine();
        engine.record_answer(true);
        let second = engine.record_answer(true);
        assert!(!second.state.is_in_streak);
        assert_eq!(second.state.current_streak, 0);
        assert_eq!(second.state.consecutive_correct, 2);
        assert_eq!(second.points_earned, 0);
    }

    #[test]
    fn test_incorrect_answer_resets_partial_run() {
        let (mut engine, _) = engine();
        engine.record_answer(true);
        engine.record_answer(true);
        let miss = engine.record_answer(false);
        assert_eq!(miss.transition, StreakTransition::Unchanged);
        assert_eq!(miss.state.consecutive_correct, 0);

        // Needs a fresh run of three to activate again
        engine.record_answer(true);
        let second = engine.record_answer(true);
        assert!(!second.state.is_in_streak);
    }

    #[test]
    fn test_points_match_reported_earnings_and_longest_is_high_water_mark() {
        let (mut engine, _) = engine();
        let pattern = [
            true, true, true, true, true, false, true, true, false, true, true, true, false,
        ];

        let mut earned = 0;
        let mut last_points = 0;
        let mut max_seen = 0;
        for correct in pattern {
            let outcome = engine.record_answer(correct);
            assert!(outcome.points_earned <= 1);
            assert!(outcome.state.total_points >= last_points);
            assert!(outcome.state.longest_streak >= max_seen);
            earned += outcome.points_earned;
            last_points = outcome.state.total_points;
            max_seen = max_seen.max(outcome.state.current_streak);
            assert_eq!(outcome.state.longest_streak, max_seen);
        }

        assert_eq!(engine.state().total_points, earned);
        assert_eq!(earned, 3 + 1);
        assert_eq!(engine.state().longest_streak, 5);
    }

    #[test]
    fn test_state_is_persisted_after_each_answer() {
        let (mut engine, store) = engine();
        for _ in 0..3 {
            engine.record_answer(true);
        }

        let reloaded = StreakEngine::new(Arc::new(store));
        assert_eq!(reloaded.state().current_streak, 3);
        assert_eq!(reloaded.state().total_points, 1);
    }

    #[test]
    fn test_record_quiz_outcome_leaves_streak_alone() {
        let store = MemoryStore::new();
        let mut engine = StreakEngine::with_clock(Arc::new(store), at(0));
        for _ in 0..4 {
            engine.record_answer(true);
        }

        engine.record_quiz_outcome(true);
        let state = engine.record_quiz_outcome(false);

        assert_eq!(state.total_quizzes_taken, 2);
        assert_eq!(state.total_quizzes_passed, 1);
        assert_eq!(state.current_streak, 4);
        assert_eq!(state.total_points, 2);
        assert_eq!(state.last_quiz_date, Some(at(0).now()));
    }

    #[test]
    fn test_reset_all_restores_defaults() {
        let (mut engine, store) = engine();
        for _ in 0..5 {
            engine.record_answer(true);
        }
        engine.record_quiz_outcome(true);

        assert_eq!(engine.reset_all(), StreakState::default());
        assert_eq!(
            StreakEngine::new(Arc::new(store)).state(),
            &StreakState::default()
        );
    }

    #[test]
    fn test_expire_only_clears_current_streak() {
        let store = MemoryStore::new();
        let mut engine = StreakEngine::with_clock(Arc::new(store.clone()), at(0));
        for _ in 0..5 {
            engine.record_answer(true);
        }
        engine.record_quiz_outcome(true);

        let mut later = StreakEngine::with_clock(Arc::new(store.clone()), at(3));
        assert!(!later.expire_if_inactive(3));

        let mut much_later = StreakEngine::with_clock(Arc::new(store), at(4));
        assert!(much_later.expire_if_inactive(3));

        let state = much_later.state();
        assert_eq!(state.current_streak, 0);
        assert_eq!(state.consecutive_correct, 5);
        assert!(state.is_in_streak);
        assert_eq!(state.total_points, 3);
        assert_eq!(state.longest_streak, 5);

        // Nothing left to expire
        assert!(!much_later.expire_if_inactive(3));

        // The stale run resumes on the next correct answer
        let next = much_later.record_answer(true);
        assert_eq!(next.state.current_streak, 6);
        assert_eq!(next.transition, StreakTransition::Extended { streak: 6 });
    }

    #[test]
    fn test_expire_without_quiz_date_is_noop() {
        let (mut engine, _) = engine();
        for _ in 0..3 {
            engine.record_answer(true);
        }
        assert!(!engine.expire_if_inactive(0));
        assert_eq!(engine.state().current_streak, 3);
    }

    #[test]
    fn test_corrupt_record_falls_back_to_default() {
        let store = MemoryStore::new();
        store.set(STREAK_KEY, "{not json").unwrap();
        let engine = StreakEngine::new(Arc::new(store));
        assert_eq!(engine.state(), &StreakState::default());
    }

    #[test]
    fn test_partial_record_is_normalized() {
        let store = MemoryStore::new();
        store
            .set(
                STREAK_KEY,
                r#"{"currentStreak": 7, "longestStreak": 2, "totalQuizzesPassed": 9, "totalQuizzesTaken": 4}"#,
            )
            .unwrap();
        let engine = StreakEngine::new(Arc::new(store));
        let state = engine.state();
        assert_eq!(state.longest_streak, 7);
        assert_eq!(state.total_quizzes_passed, 4);
        assert!(state.is_in_streak);
        assert_eq!(state.total_points, 0);
    }

    #[test]
    fn test_persisted_field_names() {
        let (mut engine, store) = engine();
        engine.record_answer(true);
        let raw = store.get(STREAK_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["consecutiveCorrectAnswers"], 1);
        assert_eq!(value["isInStreak"], false);
        assert!(value.get("totalQuizzesTaken").is_some());
        assert!(value["lastQuizDate"].is_null());
    }

    #[test]
    fn test_store_failures_are_swallowed() {
        let mut engine = StreakEngine::new(Arc::new(FailingStore));
        assert_eq!(engine.state(), &StreakState::default());

        // Every call reloads the (unreadable) record, so nothing accumulates
        let outcome = engine.record_answer(true);
        assert_eq!(outcome.state.consecutive_correct, 1);
        let state = engine.record_quiz_outcome(true);
        assert_eq!(state.total_quizzes_taken, 1);
        assert!(!engine.expire_if_inactive(0));
    }

    #[test]
    fn test_counters_saturate_at_max() {
        let store = MemoryStore::new();
        store
            .set(
                STREAK_KEY,
                &format!(
                    r#"{{"currentStreak": 0, "longestStreak": 0, "totalPoints": {max},
                        "totalQuizzesTaken": {max}, "totalQuizzesPassed": {max}}}"#,
                    max = u32::MAX
                ),
            )
            .unwrap();
        let mut engine = StreakEngine::new(Arc::new(store));

        let state = engine.record_quiz_outcome(true);
        assert_eq!(state.total_quizzes_taken, u32::MAX);
        assert_eq!(state.total_quizzes_passed, u32::MAX);

        let mut last = None;
        for _ in 0..4 {
            last = Some(engine.record_answer(true));
        }
        let outcome = last.unwrap();
        assert_eq!(outcome.state.total_points, u32::MAX);
        assert!(outcome.state.is_in_streak);
    }

    #[test]
    fn test_run_counter_saturates() {
        let store = MemoryStore::new();
        store
            .set(
                STREAK_KEY,
                &format!(
                    r#"{{"currentStreak": {max}, "consecutiveCorrectAnswers": {max}, "isInStreak": true}}"#,
                    max = u32::MAX
                ),
            )
            .unwrap();
        let mut engine = StreakEngine::new(Arc::new(store));
        let outcome = engine.record_answer(true);
        assert_eq!(outcome.state.current_streak, u32::MAX);
        assert_eq!(outcome.points_earned, 1);
    }

    #[test]
    fn test_record_without_run_length_resumes_active_streak() {
        let store = MemoryStore::new();
        store
            .set(
                STREAK_KEY,
                r#"{"currentStreak": 7, "longestStreak": 7, "totalPoints": 5}"#,
            )
            .unwrap();
        let mut engine = StreakEngine::new(Arc::new(store));
        assert!(engine.state().is_in_streak);
        assert_eq!(engine.state().consecutive_correct, 7);

        let next = engine.record_answer(true);
        assert_eq!(next.points_earned, 1);
        assert_eq!(next.state.current_streak, 8);
        assert_eq!(next.state.consecutive_correct, 8);
        assert_eq!(next.state.total_points, 6);
        assert_eq!(next.transition, StreakTransition::Extended { streak: 8 });
    }

    #[test]
    fn test_expired_shape_survives_reload() {
        let store = MemoryStore::new();
        store
            .set(
                STREAK_KEY,
                r#"{"currentStreak": 0, "consecutiveCorrectAnswers": 5, "isInStreak": true}"#,
            )
            .unwrap();
        let engine = StreakEngine::new(Arc::new(store));
        assert_eq!(engine.state().current_streak, 0);
        assert_eq!(engine.state().consecutive_correct, 5);
        assert!(engine.state().is_in_streak);
    }

    #[test]
    fn test_idle_run_is_clamped_below_threshold() {
        let store = MemoryStore::new();
        store
            .set(
                STREAK_KEY,
                r#"{"consecutiveCorrectAnswers": 9, "isInStreak": false}"#,
            )
            .unwrap();
        let mut engine = StreakEngine::new(Arc::new(store));
        assert_eq!(engine.state().consecutive_correct, STREAK_THRESHOLD - 1);

        let next = engine.record_answer(true);
        assert_eq!(next.transition, StreakTransition::Activated { streak: 3 });
    }

    #[test]
    fn test_pass_rate_rounding() {
        let mut state = StreakState::default();
        assert_eq!(state.pass_rate(), 0);

        state.total_quizzes_taken = 3;
        state.total_quizzes_passed = 2;
        assert_eq!(state.pass_rate(), 67);

        state.total_quizzes_taken = 8;
        state.total_quizzes_passed = 1;
        assert_eq!(state.pass_rate(), 13); // 12.5 rounds up

        state.total_quizzes_passed = 8;
        assert_eq!(state.pass_rate(), 100);
    }
}
