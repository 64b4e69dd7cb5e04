//! Leaderboard command implementation

use anyhow::Result;

use quizstreak::stats::LeaderboardEntry;

use super::AppContext;

/// Print the top of the leaderboard, or the window around the current player
pub fn leaderboard_command(ctx: &AppContext, limit: Option<usize>, around: bool) -> Result<()> {
    let mut manager = ctx.manager()?;
    let player = manager.profile().name();

    let entries = if around {
        let rank = manager.current_rank();
        let range = ctx.config.settings.around_range;
        manager.leaderboard().players_around_rank(rank, range)
    } else {
        let limit = limit.unwrap_or(ctx.config.settings.leaderboard_limit);
        manager.leaderboard().top_players(limit)
    };

    if entries.is_empty() {
        println!("The leaderboard is empty.");
        return Ok(());
    }

    println!(
        "{:>4}  {:<24} {:>7} {:>7} {:>7}",
        "Rank", "Player", "Points", "Streak", "Passed"
    );
    for entry in &entries {
        println!("{}", format_row(entry, entry.player_name == player));
    }
    Ok(())
}

fn format_row(entry: &LeaderboardEntry, is_current: bool) -> String {
    let marker = if is_current { " <- you" } else { "" };
    format!(
        "{:>4}  {:<24} {:>7} {:>7} {:>7}{}",
        format!("#{}", entry.rank),
        entry.player_name,
        entry.total_points,
        entry.longest_streak,
        entry.total_quizzes_passed,
        marker
    )
}
