//! Admin command implementation
//!
//! Every action is gated on the shared passphrase from the config file.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use tracing::warn;

use super::AppContext;

#[derive(Subcommand)]
pub enum AdminAction {
    /// Wipe the current player's streaks and points
    Reset,

    /// Delete every leaderboard entry
    ClearLeaderboard,

    /// Write the streak record as JSON (stdout when no file is given)
    Export {
        file: Option<PathBuf>,
    },

    /// Replace the streak record with a previously exported one
    Import {
        file: PathBuf,
    },
}

pub fn admin_command(ctx: &AppContext, passphrase: &str, action: AdminAction) -> Result<()> {
    if !ctx.config.check_passphrase(passphrase) {
        warn!("Admin command rejected: wrong passphrase");
        bail!("Wrong admin passphrase");
    }

    let mut manager = ctx.manager()?;
    match action {
        AdminAction::Reset => {
            manager.reset_account();
            println!("Streaks and points reset.");
        }
        AdminAction::ClearLeaderboard => {
            manager.clear_leaderboard();
            println!("Leaderboard cleared.");
        }
        AdminAction::Export { file } => {
            let json = manager.streaks().export();
            match file {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Exported to {}", path.display());
                }
                None => println!("{}", json),
            }
        }
        AdminAction::Import { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let state = manager
                .streaks()
                .import(&text)
                .with_context(|| format!("Rejected import from {}", file.display()))?;
            println!(
                "Imported: {} points, longest streak {}",
                state.total_points, state.longest_streak
            );
        }
    }
    Ok(())
}
