//! Quiz definitions
//!
//! Quizzes are TOML files:
//!
//! ```toml
//! title = "Rust basics"
//! passing_score = 70
//!
//! [[questions]]
//! prompt = "Which keyword declares an immutable binding?"
//! options = ["let", "mut", "static"]
//! answer = 0
//! ```

mod session;

pub use session::{QuizScore, QuizSession, SessionError};

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Error type for loading quiz files
#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid quiz: {0}")]
    Invalid(String),
}

/// A single multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub options: Vec<String>,
    /// Index into `options`
    pub answer: usize,
}

impl Question {
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.answer
    }
}

/// A complete quiz
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub title: String,

    /// Minimum percentage needed to pass
    #[serde(default = "default_passing_score")]
    pub passing_score: u32,

    pub questions: Vec<Question>,
}

fn default_passing_score() -> u32 {
    70
}

impl Quiz {
    /// Load and validate a quiz file
    pub fn from_file(path: &Path) -> Result<Self, QuizError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse and validate quiz TOML
    pub fn parse(content: &str) -> Result<Self, QuizError> {
        let quiz: Quiz = toml::from_str(content)?;
        quiz.validate()?;
        Ok(quiz)
    }

    fn validate(&self) -> Result<(), QuizError> {
        if self.questions.is_empty() {
            return Err(QuizError::Invalid("quiz has no questions".to_string()));
        }
        if self.passing_score > 100 {
            return Err(QuizError::Invalid(format!(
                "passing_score {} exceeds 100",
                self.passing_score
            )));
        }
        for (i, q) in self.questions.iter().enumerate() {
            if q.options.len() < 2 {
                return Err(QuizError::Invalid(format!(
                    "question {} needs at least two options",
                    i + 1
                )));
            }
            if q.answer >= q.options.len() {
                return Err(QuizError::Invalid(format!(
                    "question {} answer index {} is out of range",
                    i + 1,
                    q.answer
                )));
            }
        }
        Ok(())
    }
}
