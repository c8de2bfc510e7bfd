mod frame_input;
mod game_layout;
mod ui_render;
mod ui_text;
mod window_config;

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use app::app_loop::{AppMode, AppState};
use app::seed::{LaunchArgs, generate_runtime_seed};
use app::{format_seed, format_snapshot_hash};
use clap::Parser;
use frame_input::capture_frame_input;
use game_layout::{compute_frame_layout, setup_layout};
use macroquad::prelude::*;
use skirmish_core::{Game, GameConfig, InputJournal, WallClock};
use taffy::TaffyTree;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use ui_render::draw_frame;
use window_config::{build_window_conf, runtime_ui_scale};

fn window_conf() -> Conf {
    build_window_conf()
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(io::stderr)
        .init();

    let launch = LaunchArgs::parse();
    let mut game = match start_session(&launch) {
        Ok(game) => game,
        Err(err) => {
            error!("could not start session: {err:#}");
            return;
        }
    };
    let mut taffy = TaffyTree::new();
    let nodes = match setup_layout(&mut taffy) {
        Ok(nodes) => nodes,
        Err(err) => {
            error!(%err, "layout setup failed");
            return;
        }
    };

    let mut journal = InputJournal::new(game.seed(), game.config().clone());
    let mut app_state = AppState::new();
    app_state.tick(&mut game, &[]);
    let ui_scale = runtime_ui_scale();

    loop {
        let input = capture_frame_input();
        let was_over = app_state.mode == AppMode::GameOver;
        app_state.tick(&mut game, &input.keys_pressed);
        app_state.age_popups(get_frame_time());

        if !app_state.accepted_inputs.is_empty() {
            for payload in &app_state.accepted_inputs {
                journal.append(*payload);
            }
            if let Some(path) = &launch.record
                && let Err(err) = write_journal(path, &journal)
            {
                warn!(path = %path.display(), "journal not written: {err:#}");
            }
        }
        if !was_over && app_state.mode == AppMode::GameOver {
            info!(
                seed = %format_seed(game.seed()),
                turn = game.turn(),
                hash = %format_snapshot_hash(game.snapshot_hash()),
                "player defeated"
            );
        }

        clear_background(BLACK);
        match compute_frame_layout(&mut taffy, &nodes, screen_width(), screen_height()) {
            Ok(layout) => draw_frame(&game, &app_state, &layout, ui_scale),
            Err(err) => error!(%err, "layout failed"),
        }
        next_frame().await
    }
}

fn start_session(launch: &LaunchArgs) -> Result<Game> {
    let config = match &launch.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GameConfig::default(),
    };
    let seed_choice = launch.seed_choice(generate_runtime_seed());
    let seed = seed_choice.value();
    info!(seed = %format_seed(seed), source = ?seed_choice, "starting session");
    Game::with_clock(seed, &config, Box::new(WallClock::new())).context("failed to set up game")
}

fn write_journal(path: &Path, journal: &InputJournal) -> Result<()> {
    let json = serde_json::to_string_pretty(journal).context("failed to encode journal")?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}
