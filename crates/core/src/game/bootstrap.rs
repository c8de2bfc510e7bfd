//! Session construction: village terrain, the player and the enemy roster.
//! Everything here runs once per seed; `restart()` reuses the result.

use rand_chacha::rand_core::SeedableRng;
use tracing::{info, warn};

use super::*;
use crate::clock::TurnClock;
use crate::state::{Grid, Unit};
use crate::terrain::TerrainKind;

impl Game {
    /// Builds a session driven by a logical `TurnClock` of `config.turn_ms`.
    pub fn new(seed: u64, config: &GameConfig) -> Result<Self, SetupError> {
        Self::with_clock(seed, config, Box::new(TurnClock::new(config.turn_ms)))
    }

    pub fn with_clock(
        seed: u64,
        config: &GameConfig,
        clock: Box<dyn Clock>,
    ) -> Result<Self, SetupError> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let grid = build_village(config, &mut rng)?;
        let mut state = GameState::new(grid);
        let mut events = Vec::new();

        let preferred = config.player_spawn_pos()?;
        let player_pos = state.find_safe_spawn(preferred).ok_or(SetupError::NoPlayerSpawn)?;
        state.insert_unit(Unit::player(player_pos));

        for spawn in &config.enemies {
            let preferred = spawn.pos();
            let Some(pos) = state.find_safe_spawn(preferred) else {
                warn!(
                    kind = spawn.kind.label(),
                    x = preferred.x,
                    y = preferred.y,
                    "no spawn cell left"
                );
                events.push(GameEvent::SpawnFailed { kind: spawn.kind, preferred });
                continue;
            };
            let wander = random_offset(&mut rng);
            state.insert_unit(Unit::enemy(spawn.kind, pos, wander));
        }

        info!(seed, enemies = state.roster.len(), "session ready");

        Ok(Self {
            seed,
            config: config.clone(),
            initial_state: state.clone(),
            initial_rng: rng.clone(),
            setup_events: events.clone(),
            rng,
            clock,
            state,
            phase: TurnPhase::PlayerTurn,
            turn: 0,
            combat_log: VecDeque::new(),
            events,
        })
    }
}

/// Grass field crossed by a road on the middle row and column, two wall
/// columns with a gap where the road passes, four corner trees and
/// randomly scattered flowers.
fn build_village(config: &GameConfig, rng: &mut ChaCha8Rng) -> Result<Grid, SetupError> {
    let n = config.side()?;
    let size = n.unsigned_abs() as usize;
    let mid = n / 2;
    let wall_columns = [3, n - 4];
    let tree_lines = [2, n - 3];

    let mut grid = Grid::new(size, size, TerrainKind::Grass)?;
    for x in 0..n {
        for y in 0..n {
            let pos = Pos::new(x, y);
            if x == mid || y == mid {
                grid.set_base(pos, TerrainKind::Road)?;
            }
            if wall_columns.contains(&x) && y != mid {
                grid.set_base(pos, TerrainKind::Wall)?;
            }
            if tree_lines.contains(&x) && tree_lines.contains(&y) {
                grid.add_object(pos, TerrainKind::Tree)?;
            }
            let bloom = roll_percent(rng, config.flower_percent);
            if bloom && grid.cell(pos).is_some_and(|cell| cell.base() == TerrainKind::Grass) {
                grid.add_object(pos, TerrainKind::Flowers)?;
            }
        }
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnemySpawn;

    #[test]
    fn stock_village_matches_the_reference_layout() {
        let game = Game::new(3, &GameConfig::default()).expect("default setup");
        let grid = &game.state().grid;
        let base = |x, y| grid.cell(Pos::new(x, y)).map(|cell| cell.base());

        assert_eq!(grid.width(), 15);
        assert_eq!(base(7, 0), Some(TerrainKind::Road));
        assert_eq!(base(0, 7), Some(TerrainKind::Road));
        assert_eq!(base(3, 0), Some(TerrainKind::Wall));
        assert_eq!(base(11, 14), Some(TerrainKind::Wall));
        assert_eq!(base(3, 7), Some(TerrainKind::Road), "the road passes through the wall");
        assert_eq!(base(0, 0), Some(TerrainKind::Grass));
        for (x, y) in [(2, 2), (12, 2), (2, 12), (12, 12)] {
            let cell = grid.cell(Pos::new(x, y)).expect("tree cell");
            assert!(cell.has_object(TerrainKind::Tree));
            assert!(!cell.is_walkable());
        }
    }

    #[test]
    fn flowers_grow_only_on_grass() {
        let config = GameConfig { flower_percent: 100, ..GameConfig::default() };
        let game = Game::new(11, &config).expect("setup");
        let grid = &game.state().grid;
        for pos in grid.positions() {
            let cell = grid.cell(pos).expect("in bounds");
            assert_eq!(cell.has_object(TerrainKind::Flowers), cell.base() == TerrainKind::Grass);
        }
    }

    #[test]
    fn player_starts_at_the_center_and_enemies_avoid_trees() {
        let game = Game::new(5, &GameConfig::default()).expect("setup");
        let state = game.state();

        assert_eq!(state.player().pos, Pos::new(7, 7));
        assert_eq!(state.roster.len(), 4);

        let kinds: Vec<UnitKind> = state.roster.iter().map(|id| state.units[*id].kind).collect();
        assert_eq!(
            kinds,
            vec![UnitKind::Warrior, UnitKind::Archer, UnitKind::Warrior, UnitKind::Archer]
        );
        for id in &state.roster {
            let unit = &state.units[*id];
            assert!(state.grid.is_walkable(unit.pos));
            assert_ne!(unit.pos, Pos::new(2, 2));
            assert_ne!(unit.pos, Pos::new(12, 12));
        }
        assert_eq!(game.phase(), TurnPhase::PlayerTurn);
        assert_eq!(game.turn(), 0);
    }

    #[test]
    fn crowded_roster_reports_failed_spawns_and_keeps_going() {
        let config = GameConfig {
            grid_size: 1,
            enemies: vec![EnemySpawn { kind: UnitKind::Warrior, x: 0, y: 0 }],
            ..GameConfig::default()
        };
        let game = Game::new(1, &config).expect("player still fits");

        assert!(game.state().roster.is_empty());
        assert_eq!(
            game.events(),
            &[GameEvent::SpawnFailed { kind: UnitKind::Warrior, preferred: Pos::new(0, 0) }]
        );
    }

    #[test]
    fn invalid_config_is_a_setup_error() {
        let config = GameConfig { grid_size: 0, ..GameConfig::default() };
        assert!(matches!(Game::new(1, &config), Err(SetupError::Config(_))));
    }

    #[test]
    fn oversized_grid_is_rejected_before_allocation() {
        let config =
            GameConfig { grid_size: 3_000_000_000, enemies: Vec::new(), ..Default::default() };
        assert!(matches!(
            Game::new(1, &config),
            Err(SetupError::Config(ConfigError::GridTooLarge { grid_size: 3_000_000_000 }))
        ));
    }

    #[test]
    fn same_seed_builds_the_same_session() {
        let a = Game::new(42, &GameConfig::default()).expect("setup");
        let b = Game::new(42, &GameConfig::default()).expect("setup");
        assert_eq!(a.terrain_snapshot(), b.terrain_snapshot());
        assert_eq!(a.unit_snapshots(), b.unit_snapshots());
    }
}
