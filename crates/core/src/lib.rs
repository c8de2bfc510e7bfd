pub mod clock;
pub mod config;
pub mod content;
pub mod game;
pub mod journal;
pub mod replay;
pub mod state;
pub mod terrain;
pub mod types;

pub use clock::{Clock, ManualClock, TurnClock, WallClock};
pub use config::{ConfigError, EnemySpawn, GameConfig, MAX_GRID_SIZE, SpawnPoint};
pub use game::{
    AttackOutcome, CellSnapshot, Game, LayerSnapshot, PlayerSnapshot, SetupError, UnitSnapshot,
    damage_for,
};
pub use journal::{InputJournal, InputPayload, InputRecord};
pub use replay::*;
pub use state::{GameState, Grid, Unit};
pub use terrain::{DepthCategory, LayerId, TerrainError, TerrainKind};
pub use types::*;
