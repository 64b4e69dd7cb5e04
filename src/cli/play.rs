//! Play command implementation

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};

use quizstreak::quiz::{Quiz, QuizSession};
use quizstreak::stats::{GamificationManager, StreakTransition, describe_stats, describe_streak};

use super::AppContext;

/// Run a quiz interactively on stdin/stdout
pub fn play_command(ctx: &AppContext, quiz_path: &Path) -> Result<()> {
    let quiz = Quiz::from_file(quiz_path)
        .with_context(|| format!("Failed to load quiz: {}", quiz_path.display()))?;
    let mut manager = ctx.manager()?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_session(&mut manager, quiz, stdin.lock(), stdout.lock())
}

/// Drive one attempt: every answer goes through the streak engine, the
/// finished quiz updates totals and the leaderboard.
pub fn run_session<R: BufRead, W: Write>(
    manager: &mut GamificationManager,
    quiz: Quiz,
    mut input: R,
    mut out: W,
) -> Result<()> {
    let mut session = QuizSession::new(quiz);
    writeln!(out, "== {} ==", session.quiz().title)?;
    writeln!(out, "{}", describe_streak(manager.streaks().state()))?;

    let total = session.quiz().questions.len();
    while let Some(question) = session.current_question() {
        writeln!(out)?;
        writeln!(
            out,
            "Question {}/{}: {}",
            session.position() + 1,
            total,
            question.prompt
        )?;
        for (i, option) in question.options.iter().enumerate() {
            writeln!(out, "  {}) {}", i + 1, option)?;
        }
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            writeln!(out, "Quiz abandoned.")?;
            return Ok(());
        }

        let Some(choice) = parse_choice(&line) else {
            writeln!(out, "Enter the number of an option.")?;
            continue;
        };
        let correct = match session.answer(choice) {
            Ok(correct) => correct,
            Err(e) => {
                writeln!(out, "{}", e)?;
                continue;
            }
        };

        let outcome = manager.record_answer(correct);
        writeln!(out, "{}", if correct { "Correct!" } else { "Wrong." })?;
        match outcome.transition {
            StreakTransition::Activated { .. } | StreakTransition::Extended { .. } => {
                writeln!(out, "+{} point", outcome.points_earned)?;
                writeln!(out, "{}", describe_streak(&outcome.state))?;
            }
            StreakTransition::Broken { lost } => {
                writeln!(out, "Streak of {} lost.", lost)?;
            }
            StreakTransition::Building { .. } => {
                writeln!(out, "{}", describe_streak(&outcome.state))?;
            }
            StreakTransition::Unchanged => {}
        }
    }

    let score = session.score();
    let completion = manager.complete_quiz(score.passed);

    writeln!(out)?;
    writeln!(
        out,
        "Score: {}/{} ({}%) - {}",
        score.correct,
        score.total,
        score.percent,
        if score.passed { "PASSED" } else { "FAILED" }
    )?;
    writeln!(out, "{}", describe_stats(&completion.state))?;
    if completion.rank > 0 {
        writeln!(out, "{} is ranked #{}", completion.player, completion.rank)?;
    }
    Ok(())
}

/// 1-based option number typed by the player, as a 0-based index
fn parse_choice(line: &str) -> Option<usize> {
    line.trim().parse::<usize>().ok()?.checked_sub(1)
}
