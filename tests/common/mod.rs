//! Shared test utilities for store-backed integration tests

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use quizstreak::stats::{Clock, FixedClock};
use quizstreak::store::SqliteStore;
use tempfile::TempDir;

/// Creates a temporary directory holding a fresh SQLite data file
pub fn create_test_store() -> (TempDir, PathBuf, SqliteStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("data.db");
    let store = SqliteStore::open(&path).expect("Failed to open test store");
    (temp_dir, path, store)
}

/// Fixed clock `days` after a reference date
pub fn clock_at(days: i64) -> Arc<dyn Clock> {
    Arc::new(FixedClock(reference_time() + Duration::days(days)))
}

pub fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap()
}
