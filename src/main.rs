use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

use cli::AppContext;
use cli::admin::AdminAction;

#[derive(Parser)]
#[command(name = "quizstreak")]
#[command(about = "Quizzes with answer streaks, points and a local leaderboard")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.quizstreak/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the data file (overrides settings.data_path)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a quiz from a TOML file
    Play {
        /// Quiz definition file
        quiz: PathBuf,
    },

    /// Show streak status and totals for the current player
    Stats,

    /// Show the leaderboard
    Leaderboard {
        /// Number of players to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Show the players ranked around you instead of the top
        #[arg(long)]
        around: bool,
    },

    /// Show or change the player name
    Player {
        /// New player name
        name: Option<String>,
    },

    /// Passphrase-protected maintenance
    Admin {
        /// Admin passphrase (settings.admin_passphrase)
        #[arg(long)]
        passphrase: String,

        #[command(subcommand)]
        action: AdminAction,
    },

    /// Write a default config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let ctx = AppContext::load(cli.config, cli.data)?;

    match cli.command {
        Commands::Play { quiz } => cli::play::play_command(&ctx, &quiz)?,
        Commands::Stats => cli::stats::stats_command(&ctx)?,
        Commands::Leaderboard { limit, around } => {
            cli::leaderboard::leaderboard_command(&ctx, limit, around)?
        }
        Commands::Player { name } => cli::player::player_command(&ctx, name)?,
        Commands::Admin { passphrase, action } => {
            cli::admin::admin_command(&ctx, &passphrase, action)?
        }
        Commands::Init { force } => cli::init::init_command(&ctx.config_path, force)?,
    }

    Ok(())
}
