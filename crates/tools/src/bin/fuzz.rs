use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use clap::Parser;
use skirmish_core::{
    Direction, Game, GameConfig, GameError, GameEvent, InputJournal, TurnPhase,
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    turns: u32,
    /// TOML session config; stock village when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Write the generated inputs as a replayable journal
    #[arg(short, long)]
    record: Option<PathBuf>,
}

fn random_direction(rng: &mut ChaCha8Rng) -> Direction {
    loop {
        let dx = (rng.next_u32() % 3) as i8 - 1;
        let dy = (rng.next_u32() % 3) as i8 - 1;
        if let Some(direction) = Direction::new(dx, dy) {
            return direction;
        }
    }
}

fn check_invariants(game: &Game) -> Result<()> {
    let state = game.state();
    let mut occupied = BTreeSet::new();
    for (_, unit) in state.units.iter() {
        ensure!(unit.hp <= unit.max_hp, "Invariant failed: HP > Max HP");
        ensure!(state.grid.is_walkable(unit.pos), "Invariant failed: unit on a blocked cell");
        ensure!(occupied.insert(unit.pos), "Invariant failed: two units share {:?}", unit.pos);
    }
    ensure!(
        (state.player().hp == 0) == (game.phase() == TurnPhase::GameOver),
        "Invariant failed: phase {:?} with player hp {}",
        game.phase(),
        state.player().hp
    );
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => GameConfig::default(),
    };

    println!("Starting Fuzz harness on seed {} for {} turns...", args.seed, args.turns);
    let mut game = Game::new(args.seed, &config).context("Failed to set up session")?;
    let mut journal = InputJournal::new(args.seed, config);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut defeats = 0;
    let mut kills = 0;

    for _ in 0..args.turns {
        let direction = random_direction(&mut rng);
        match game.submit_direction(direction) {
            Ok(report) => journal.append_direction(direction, report.clock_ms),
            Err(GameError::GameOver) => {
                defeats += 1;
                info!(turn = game.turn(), "defeat, restarting");
                game.restart();
                journal.append_restart();
            }
            Err(err) => return Err(err).context("Intent rejected outside of game over"),
        }
        kills += game
            .drain_events()
            .iter()
            .filter(|event| matches!(event, GameEvent::UnitDied { reward: Some(_), .. }))
            .count();
        check_invariants(&game)?;
    }

    println!("Fuzz complete: {defeats} defeats, {kills} kills");
    println!("Snapshot Hash: {}", game.snapshot_hash());

    if let Some(path) = &args.record {
        let raw = serde_json::to_string_pretty(&journal).context("Failed to serialize journal")?;
        fs::write(path, raw)
            .with_context(|| format!("Failed to write journal: {}", path.display()))?;
        println!("Journal written to {}", path.display());
    }

    Ok(())
}
