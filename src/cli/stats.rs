//! Stats command implementation

use anyhow::Result;

use super::AppContext;

/// Show streak status and totals for the current player
pub fn stats_command(ctx: &AppContext) -> Result<()> {
    let mut manager = ctx.manager()?;
    let player = manager.profile().name();
    let rank = manager.current_rank();
    let (streak, stats) = manager.describe();

    println!("Player: {}", player);
    println!("{}", streak);
    println!("{}", stats);
    if rank > 0 {
        println!("Leaderboard rank: #{}", rank);
    } else {
        println!("Not on the leaderboard yet. Finish a quiz to get ranked.");
    }
    Ok(())
}
