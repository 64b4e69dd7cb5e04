//! Streak record export/import
//!
//! Export writes the record as indented JSON. Import validates the payload
//! before anything is persisted, so a rejected file leaves the current
//! state untouched.

use serde_json::Value;
use tracing::{info, warn};

use super::streaks::{StoredStreakRecord, StreakEngine, StreakState};

/// Fields an import payload must carry as non-negative integers
pub const REQUIRED_FIELDS: [&str; 5] = [
    "currentStreak",
    "longestStreak",
    "totalPoints",
    "totalQuizzesTaken",
    "totalQuizzesPassed",
];

/// Error type for rejected imports
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a JSON object")]
    NotAnObject,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Field {0} must be a non-negative integer")]
    InvalidField(&'static str),
}

/// Serialize a streak record as indented JSON
pub fn export_state(state: &StreakState) -> String {
    // Plain struct of integers, bools and an optional timestamp
    serde_json::to_string_pretty(state).unwrap_or_default()
}

/// Validate and parse an exported record without persisting it
pub fn parse_import(text: &str) -> Result<StreakState, ImportError> {
    let value: Value = serde_json::from_str(text)?;
    let object = value.as_object().ok_or(ImportError::NotAnObject)?;

    for field in REQUIRED_FIELDS {
        let v = object.get(field).ok_or(ImportError::MissingField(field))?;
        let fits = v.as_u64().is_some_and(|n| u32::try_from(n).is_ok());
        if !fits {
            return Err(ImportError::InvalidField(field));
        }
    }

    let record: StoredStreakRecord = serde_json::from_value(value)?;
    Ok(record.normalize())
}

impl StreakEngine {
    /// Current record as indented JSON
    pub fn export(&mut self) -> String {
        export_state(self.load())
    }

    /// Replace the stored record with an imported one
    pub fn import(&mut self, text: &str) -> Result<StreakState, ImportError> {
        match parse_import(text) {
            Ok(state) => {
                info!(points = state.total_points, "Imported streak record");
                Ok(self.replace(state))
            }
            Err(e) => {
                warn!("Rejected streak import: {}", e);
                Err(e)
            }
        }
    }
}
