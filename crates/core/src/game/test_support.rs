//! Shared fixtures for the `game` submodule test suites.

use rand_chacha::rand_core::SeedableRng;

use super::*;
use crate::clock::ManualClock;
use crate::state::{Grid, Unit};
use crate::terrain::TerrainKind;

pub(super) fn open_field(size: usize) -> GameState {
    let grid = Grid::new(size, size, TerrainKind::Grass).expect("grass grid");
    GameState::new(grid)
}

pub(super) fn add_warrior(state: &mut GameState, pos: Pos) -> EntityId {
    state.insert_unit(Unit::enemy(UnitKind::Warrior, pos, Offset::STAY))
}

pub(super) fn add_archer(state: &mut GameState, pos: Pos) -> EntityId {
    state.insert_unit(Unit::enemy(UnitKind::Archer, pos, Offset::STAY))
}

/// Empty grass field with only the player, driven by a manual clock. Wander
/// never re-rolls, so enemies spawned with `Offset::STAY` hold still.
pub(super) fn arena(size: usize, player: Pos) -> (Game, ManualClock) {
    let config = GameConfig {
        grid_size: size as u32,
        wander_turn_percent: 0,
        flower_percent: 0,
        enemies: Vec::new(),
        ..GameConfig::default()
    };
    let mut state = open_field(size);
    state.insert_unit(Unit::player(player));

    let clock = ManualClock::new();
    let rng = ChaCha8Rng::seed_from_u64(0);
    let game = Game {
        seed: 0,
        config,
        initial_state: state.clone(),
        initial_rng: rng.clone(),
        setup_events: Vec::new(),
        rng,
        clock: Box::new(clock.clone()),
        state,
        phase: TurnPhase::PlayerTurn,
        turn: 0,
        combat_log: VecDeque::new(),
        events: Vec::new(),
    };
    (game, clock)
}
