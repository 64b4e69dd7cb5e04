//! Human-readable streak and stats summaries

use super::streaks::StreakState;

/// Encouragement or celebration line for the current streak.
///
/// Before activation the text counts down the answers still needed; once
/// active, the emphasis grows with the streak length.
pub fn describe_streak(state: &StreakState) -> String {
    if !state.is_in_streak {
        return match state.answers_until_streak() {
            1 => "One more correct answer to start a streak!".to_string(),
            n => format!("Answer {n} more questions correctly in a row to start a streak!"),
        };
    }

    let streak = state.current_streak;
    match streak {
        0..5 => format!("🔥 {streak} in a row! Keep it going!"),
        5..10 => format!("🔥🔥 {streak} in a row! You're on fire!"),
        10..20 => format!("🔥🔥🔥 {streak} in a row! Unstoppable!"),
        _ => format!("🏆 {streak} in a row! LEGENDARY!"),
    }
}

/// One-line totals summary
pub fn describe_stats(state: &StreakState) -> String {
    format!(
        "Points: {} | Current streak: {} | Longest streak: {} | Pass rate: {}%",
        state.total_points,
        state.current_streak,
        state.longest_streak,
        state.pass_rate()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn building(consecutive: u32) -> StreakState {
        StreakState {
            consecutive_correct: consecutive,
            ..Default::default()
        }
    }

    fn active(streak: u32) -> StreakState {
        StreakState {
            current_streak: streak,
            longest_streak: streak,
            consecutive_correct: streak,
            is_in_streak: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_countdown_before_activation() {
        assert!(describe_streak(&building(0)).contains("3 more"));
        assert!(describe_streak(&building(1)).contains("2 more"));
        assert_eq!(
            describe_streak(&building(2)),
            "One more correct answer to start a streak!"
        );
    }

    #[test]
    fn test_active_tiers() {
        assert!(describe_streak(&active(3)).contains("Keep it going"));
        assert!(describe_streak(&active(4)).contains("Keep it going"));
        assert!(describe_streak(&active(5)).contains("on fire"));
        assert!(describe_streak(&active(9)).contains("on fire"));
        assert!(describe_streak(&active(10)).contains("Unstoppable"));
        assert!(describe_streak(&active(19)).contains("Unstoppable"));
        assert!(describe_streak(&active(20)).contains("LEGENDARY"));
        assert!(describe_streak(&active(250)).starts_with("🏆 250"));
    }

    #[test]
    fn test_stats_summary() {
        let state = StreakState {
            total_points: 42,
            current_streak: 4,
            longest_streak: 11,
            total_quizzes_taken: 3,
            total_quizzes_passed: 2,
            consecutive_correct: 4,
            is_in_streak: true,
            ..Default::default()
        };
        assert_eq!(
            describe_stats(&state),
            "Points: 42 | Current streak: 4 | Longest streak: 11 | Pass rate: 67%"
        );
        assert!(describe_stats(&StreakState::default()).ends_with("Pass rate: 0%"));
    }
}
