use std::collections::VecDeque;
use std::mem;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;

use crate::clock::Clock;
use crate::config::{ConfigError, GameConfig};
use crate::state::GameState;
use crate::terrain::TerrainError;
use crate::types::*;

mod behavior;
mod bootstrap;
mod combat;
mod hash;
mod movement;
mod snapshot;
mod spawn;
mod turn;

#[cfg(test)]
mod test_support;

pub use combat::{AttackOutcome, damage_for};
pub use snapshot::{CellSnapshot, LayerSnapshot, PlayerSnapshot, UnitSnapshot};

#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Terrain(#[from] TerrainError),
    #[error("no walkable, unoccupied cell is left for the player")]
    NoPlayerSpawn,
}

pub struct Game {
    seed: u64,
    config: GameConfig,
    rng: ChaCha8Rng,
    // Session as built at setup; restart() returns here.
    initial_state: GameState,
    initial_rng: ChaCha8Rng,
    setup_events: Vec<GameEvent>,
    clock: Box<dyn Clock>,
    state: GameState,
    phase: TurnPhase,
    turn: u64,
    combat_log: VecDeque<CombatLogEntry>,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Most recent entries last.
    pub fn combat_log(&self) -> impl Iterator<Item = &CombatLogEntry> {
        self.combat_log.iter()
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.events)
    }

    fn push_log(&mut self, entry: CombatLogEntry) {
        if self.config.combat_log_len == 0 {
            return;
        }
        while self.combat_log.len() >= self.config.combat_log_len {
            self.combat_log.pop_front();
        }
        self.combat_log.push_back(entry);
    }
}

fn roll_percent(rng: &mut ChaCha8Rng, percent: u8) -> bool {
    rng.next_u32() % 100 < u32::from(percent)
}

fn random_offset(rng: &mut ChaCha8Rng) -> Offset {
    let dx = (rng.next_u32() % 3) as i8 - 1;
    let dy = (rng.next_u32() % 3) as i8 - 1;
    Offset::new(dx, dy).unwrap_or_default()
}
