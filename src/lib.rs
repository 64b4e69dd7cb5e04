//! quizstreak - quizzes with streaks and a local leaderboard
//!
//! Runs multiple-choice quizzes and layers gamification on top: answer
//! streaks that earn points, pass/fail totals, and a ranked leaderboard of
//! every player who has used the same data store.
//!
//! ## Modules
//!
//! - [`stats`]: streak engine, leaderboard engine and status text
//! - [`quiz`]: quiz definitions and the single-attempt session controller
//! - [`store`]: key/value persistence (in-memory or SQLite)
//! - [`config`]: `~/.quizstreak/config.toml`

pub mod config;
pub mod quiz;
pub mod stats;
pub mod store;
