//! Single quiz attempt

use super::{Question, Quiz};

/// Error type for session misuse
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Quiz is already complete")]
    Complete,

    #[error("Option {choice} does not exist (question has {available} options)")]
    InvalidOption { choice: usize, available: usize },
}

/// Final tally of an attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizScore {
    pub correct: usize,
    pub total: usize,
    /// Rounded half up
    pub percent: u32,
    pub passed: bool,
}

/// Tracks the current question and recorded answers for one attempt
#[derive(Debug, Clone)]
pub struct QuizSession {
    quiz: Quiz,
    current: usize,
    answers: Vec<usize>,
}

impl QuizSession {
    pub fn new(quiz: Quiz) -> Self {
        Self {
            quiz,
            current: 0,
            answers: Vec::new(),
        }
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    /// Question waiting for an answer, `None` once complete
    pub fn current_question(&self) -> Option<&Question> {
        self.quiz.questions.get(self.current)
    }

    /// 0-based index of the current question
    pub fn position(&self) -> usize {
        self.current
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.quiz.questions.len()
    }

    /// Record `choice` for the current question and advance.
    /// Returns whether the answer was correct.
    pub fn answer(&mut self, choice: usize) -> Result<bool, SessionError> {
        let question = self.current_question().ok_or(SessionError::Complete)?;
        if choice >= question.options.len() {
            return Err(SessionError::InvalidOption {
                choice,
                available: question.options.len(),
            });
        }

        let correct = question.is_correct(choice);
        self.answers.push(choice);
        self.current += 1;
        Ok(correct)
    }

    /// Score over all questions; unanswered ones count as wrong
    pub fn score(&self) -> QuizScore {
        let correct = self
            .quiz
            .questions
            .iter()
            .zip(&self.answers)
            .filter(|(q, choice)| q.is_correct(**choice))
            .count();
        let total = self.quiz.questions.len();
        let percent = if total == 0 {
            0
        } else {
            ((200 * correct + total) / (2 * total)) as u32
        };

        QuizScore {
            correct,
            total,
            percent,
            passed: percent >= self.quiz.passing_score,
        }
    }
}
