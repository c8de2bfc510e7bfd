use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use skirmish_core::{GameConfig, InputJournal, ReplayResult, replay::replay_to_end};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the journal JSON file to replay
    #[arg(short, long)]
    journal: PathBuf,
    /// TOML config that replaces the one stored in the journal
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let journal_data = fs::read_to_string(&args.journal)
        .with_context(|| format!("Failed to read journal file: {}", args.journal.display()))?;
    let mut journal: InputJournal = serde_json::from_str(&journal_data)
        .with_context(|| "Failed to deserialize journal JSON")?;

    if let Some(path) = &args.config {
        journal.config = GameConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?;
    }
    info!(seed = journal.seed, inputs = journal.inputs.len(), "replaying journal");

    let result: ReplayResult =
        replay_to_end(&journal).context("Replay failed during execution")?;

    println!("Replay complete.");
    println!("Final Turn: {}", result.final_turn);
    println!("Phase: {:?}", result.phase);
    println!(
        "Player: level {} hp {}/{} gold {}",
        result.player.level, result.player.hp, result.player.max_hp, result.player.gold
    );
    println!("Enemies Remaining: {}", result.enemies_remaining);
    println!("Snapshot Hash: {}", result.final_snapshot_hash);

    Ok(())
}
