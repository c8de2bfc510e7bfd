//! Session configuration loaded from TOML.
//! Every field has a default, so an empty file yields the stock village map
//! with its four enemies.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::{Pos, UnitKind};

/// Largest accepted grid side.
pub const MAX_GRID_SIZE: u32 = 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub x: i32,
    pub y: i32,
}

impl SpawnPoint {
    pub fn pos(self) -> Pos {
        Pos::new(self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub kind: UnitKind,
    pub x: i32,
    pub y: i32,
}

impl EnemySpawn {
    pub fn pos(self) -> Pos {
        Pos::new(self.x, self.y)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Width and height of the square grid.
    pub grid_size: u32,
    /// Logical milliseconds that pass per enemy phase when no wall clock is injected.
    pub turn_ms: u64,
    /// Chance per wander action that an enemy picks a fresh direction.
    pub wander_turn_percent: u8,
    /// Chance that a grass cell gets decorative flowers.
    pub flower_percent: u8,
    pub combat_log_len: usize,
    /// Preferred player cell; the grid center when unset.
    pub player_spawn: Option<SpawnPoint>,
    pub enemies: Vec<EnemySpawn>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 15,
            turn_ms: 1000,
            wander_turn_percent: 20,
            flower_percent: 10,
            combat_log_len: 5,
            player_spawn: None,
            enemies: vec![
                EnemySpawn { kind: UnitKind::Warrior, x: 2, y: 2 },
                EnemySpawn { kind: UnitKind::Archer, x: 12, y: 12 },
                EnemySpawn { kind: UnitKind::Warrior, x: 2, y: 12 },
                EnemySpawn { kind: UnitKind::Archer, x: 12, y: 2 },
            ],
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("grid_size must be at least 1")]
    ZeroGridSize,
    #[error("grid_size {grid_size} exceeds the maximum of {MAX_GRID_SIZE}")]
    GridTooLarge { grid_size: u32 },
    #[error("{field} must be a percentage between 0 and 100, got {value}")]
    PercentOutOfRange { field: &'static str, value: u8 },
    #[error("enemies[{index}] uses the player kind")]
    PlayerInRoster { index: usize },
    #[error("spawn point ({x}, {y}) lies outside the {grid_size}x{grid_size} grid")]
    SpawnOutsideGrid { x: i32, y: i32, grid_size: u32 },
}

impl GameConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let side = self.side()?;
        for (field, value) in [
            ("wander_turn_percent", self.wander_turn_percent),
            ("flower_percent", self.flower_percent),
        ] {
            if value > 100 {
                return Err(ConfigError::PercentOutOfRange { field, value });
            }
        }
        if let Some(spawn) = self.player_spawn {
            self.check_inside(spawn.pos(), side)?;
        }
        for (index, enemy) in self.enemies.iter().enumerate() {
            if enemy.kind == UnitKind::Player {
                return Err(ConfigError::PlayerInRoster { index });
            }
            self.check_inside(enemy.pos(), side)?;
        }
        Ok(())
    }

    /// Grid side as a coordinate bound, checked against `1..=MAX_GRID_SIZE`.
    pub fn side(&self) -> Result<i32, ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::ZeroGridSize);
        }
        let too_large = ConfigError::GridTooLarge { grid_size: self.grid_size };
        if self.grid_size > MAX_GRID_SIZE {
            return Err(too_large);
        }
        i32::try_from(self.grid_size).map_err(|_| too_large)
    }

    pub fn player_spawn_pos(&self) -> Result<Pos, ConfigError> {
        let center = self.side()? / 2;
        Ok(self.player_spawn.map_or(Pos::new(center, center), SpawnPoint::pos))
    }

    fn check_inside(&self, pos: Pos, side: i32) -> Result<(), ConfigError> {
        if pos.x < 0 || pos.y < 0 || pos.x >= side || pos.y >= side {
            return Err(ConfigError::SpawnOutsideGrid {
                x: pos.x,
                y: pos.y,
                grid_size: self.grid_size,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_document_yields_defaults() {
        let config = GameConfig::from_toml_str("").expect("empty config is valid");
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.player_spawn_pos().expect("center"), Pos::new(7, 7));
    }

    #[test]
    fn partial_document_overrides_only_named_fields() {
        let config = GameConfig::from_toml_str(
            r#"
            grid_size = 9
            wander_turn_percent = 50

            [[enemies]]
            kind = "archer"
            x = 1
            y = 8
            "#,
        )
        .expect("valid config");

        assert_eq!(config.grid_size, 9);
        assert_eq!(config.wander_turn_percent, 50);
        assert_eq!(config.turn_ms, 1000);
        assert_eq!(config.enemies, vec![EnemySpawn { kind: UnitKind::Archer, x: 1, y: 8 }]);
        assert_eq!(config.player_spawn_pos().expect("configured spawn"), Pos::new(4, 4));
    }

    #[test]
    fn serialized_defaults_parse_back_to_defaults() {
        let raw = toml::to_string(&GameConfig::default()).expect("serialize defaults");
        let parsed = GameConfig::from_toml_str(&raw).expect("defaults are valid");
        assert_eq!(parsed, GameConfig::default());
    }

    #[test]
    fn rejects_out_of_range_percentages() {
        let err = GameConfig::from_toml_str("flower_percent = 101").expect_err("101% is invalid");
        assert!(matches!(
            err,
            ConfigError::PercentOutOfRange { field: "flower_percent", value: 101 }
        ));
    }

    #[test]
    fn rejects_zero_grid_and_player_enemies() {
        let zero = GameConfig::from_toml_str("grid_size = 0\nenemies = []").expect_err("zero grid");
        assert!(matches!(zero, ConfigError::ZeroGridSize));

        let player = GameConfig::from_toml_str(
            r#"
            [[enemies]]
            kind = "player"
            x = 1
            y = 1
            "#,
        )
        .expect_err("player in roster");
        assert!(matches!(player, ConfigError::PlayerInRoster { index: 0 }));
    }

    #[test]
    fn rejects_grids_beyond_the_maximum_side() {
        let raw = "grid_size = 3000000000\nenemies = []";
        let err = GameConfig::from_toml_str(raw).expect_err("oversized grid");
        assert!(matches!(err, ConfigError::GridTooLarge { grid_size: 3_000_000_000 }));

        let limit =
            GameConfig { grid_size: MAX_GRID_SIZE, enemies: Vec::new(), ..Default::default() };
        assert_eq!(limit.side().expect("largest accepted grid"), 1024);
        assert_eq!(limit.player_spawn_pos().expect("center"), Pos::new(512, 512));
    }

    #[test]
    fn rejects_spawns_outside_the_grid() {
        let raw = "grid_size = 5\nenemies = []\nplayer_spawn = { x = 5, y = 0 }";
        let err = GameConfig::from_toml_str(raw).expect_err("x = 5 is outside a 5x5 grid");
        assert!(matches!(err, ConfigError::SpawnOutsideGrid { x: 5, y: 0, grid_size: 5 }));
    }

    #[test]
    fn unknown_keys_are_reported_as_parse_errors() {
        let err = GameConfig::from_toml_str("grid_sise = 3").expect_err("typo");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("skirmish.toml");
        fs::write(&path, "turn_ms = 250\n").expect("write config");

        let config = GameConfig::load(&path).expect("load config");
        assert_eq!(config.turn_ms, 250);

        let missing = GameConfig::load(&dir.path().join("missing.toml")).expect_err("missing");
        assert!(matches!(missing, ConfigError::Io(_)));
    }
}
