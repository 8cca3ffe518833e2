mod args;
mod play;

use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use sayaw_core::{ScoringConfig, SpawnerConfig};
use score_ledger::{GameMode, JsonFileStore, Leaderboard};
use tracing::info;
use tracing_subscriber::EnvFilter;
use wall_schema::SessionScript;

use crate::args::{ScoringArgs, SpawnerArgs};

#[derive(Debug, Parser)]
#[command(name = "sayaw")]
#[command(about = "Sayaw wall scoring CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replay a recorded session script and save its score.
    Play {
        script: PathBuf,
        #[arg(short, long, default_value = "sayaw_scores.json")]
        ledger: PathBuf,
        /// Overrides the name recorded in the script.
        #[arg(long)]
        player: Option<String>,
        /// Scoring table as JSON.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print the summary as JSON instead of the event table.
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        scoring: ScoringArgs,
        #[command(flatten)]
        spawner: SpawnerArgs,
    },
    /// Inspect or wipe saved scores.
    Leaderboard {
        #[arg(short, long, default_value = "sayaw_scores.json")]
        ledger: PathBuf,
        #[command(subcommand)]
        action: LeaderboardAction,
    },
}

#[derive(Debug, Subcommand)]
enum LeaderboardAction {
    Show { mode: String },
    Clear { mode: String },
    ClearAll,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            script,
            ledger,
            player,
            config,
            json,
            scoring,
            spawner,
        } => {
            let text = fs::read_to_string(&script)
                .with_context(|| format!("failed to read script: {}", script.display()))?;
            let session: SessionScript = serde_json::from_str(&text)
                .with_context(|| format!("invalid session script: {}", script.display()))?;

            let mut scoring_config = match &config {
                Some(path) => ScoringConfig::from_json_file(path)
                    .with_context(|| format!("failed to load config: {}", path.display()))?,
                None => ScoringConfig::default(),
            };
            scoring.apply(&mut scoring_config);
            let spawner_config = SpawnerConfig::from(&spawner);

            let raw_name = player.as_deref().unwrap_or(&session.player_name);
            let name = play::enter_name(raw_name).unwrap_or_default();

            let store = JsonFileStore::open(&ledger)
                .with_context(|| format!("failed to open ledger: {}", ledger.display()))?;
            let board = Leaderboard::new(store);

            info!(script = %script.display(), mode = %session.mode, "replaying session");
            let report =
                play::run_session(&session, scoring_config, spawner_config, &name, &board)?;

            if json {
                let out = serde_json::to_string_pretty(&report.summary)
                    .context("failed to serialize summary")?;
                println!("{out}");
            } else {
                for row in &report.rows {
                    println!("{row}");
                }
                println!();
                println!("{}", report.summary);
            }
        }
        Command::Leaderboard { ledger, action } => {
            let store = JsonFileStore::open(&ledger)
                .with_context(|| format!("failed to open ledger: {}", ledger.display()))?;
            let board = Leaderboard::new(store);

            match action {
                LeaderboardAction::Show { mode } => {
                    let mode: GameMode = mode.parse()?;
                    let entries = board.load_top(mode.key())?;
                    if entries.is_empty() {
                        println!("No scores for {mode}");
                    }
                    for (rank, entry) in entries.iter().enumerate() {
                        println!(
                            "{}. {:<12} {:>6}  {}",
                            rank + 1,
                            entry.player_name,
                            entry.score,
                            entry.date
                        );
                    }
                }
                LeaderboardAction::Clear { mode } => {
                    let mode: GameMode = mode.parse()?;
                    board.delete_all(mode.key())?;
                    println!("Cleared {mode}");
                }
                LeaderboardAction::ClearAll => {
                    board.delete_everything()?;
                    println!("Cleared all scores");
                }
            }
        }
    }

    Ok(())
}
