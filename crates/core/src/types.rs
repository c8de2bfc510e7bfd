use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct EntityId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    pub fn offset(self, offset: Offset) -> Self {
        Self { y: self.y + i32::from(offset.dy), x: self.x + i32::from(offset.dx) }
    }

    /// Squared Euclidean distance. Comparing it against squared integer
    /// thresholds gives the same answer as comparing the real distance.
    pub fn distance_squared(self, other: Pos) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        dx * dx + dy * dy
    }
}

/// One-step grid offset with both components in `-1..=1`. The zero offset is
/// a valid "stay put" outcome for wandering enemies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    dx: i8,
    dy: i8,
}

impl Offset {
    pub const STAY: Offset = Offset { dx: 0, dy: 0 };

    pub fn new(dx: i8, dy: i8) -> Option<Self> {
        if (-1..=1).contains(&dx) && (-1..=1).contains(&dy) { Some(Self { dx, dy }) } else { None }
    }

    /// Unit step from `from` toward `to`, taking the sign of each axis independently.
    pub fn toward(from: Pos, to: Pos) -> Self {
        Self { dx: (to.x - from.x).signum() as i8, dy: (to.y - from.y).signum() as i8 }
    }

    pub fn dx(self) -> i8 {
        self.dx
    }

    pub fn dy(self) -> i8 {
        self.dy
    }

    pub fn is_stay(self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

/// Player intent: a one-step offset that is never the zero vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Direction(Offset);

impl Direction {
    pub const UP: Direction = Direction(Offset { dx: 0, dy: -1 });
    pub const DOWN: Direction = Direction(Offset { dx: 0, dy: 1 });
    pub const LEFT: Direction = Direction(Offset { dx: -1, dy: 0 });
    pub const RIGHT: Direction = Direction(Offset { dx: 1, dy: 0 });

    pub fn new(dx: i8, dy: i8) -> Option<Self> {
        Offset::new(dx, dy).filter(|offset| !offset.is_stay()).map(Self)
    }

    pub fn offset(self) -> Offset {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Player,
    Warrior,
    Archer,
}

impl UnitKind {
    pub fn label(self) -> &'static str {
        match self {
            UnitKind::Player => "player",
            UnitKind::Warrior => "warrior",
            UnitKind::Archer => "archer",
        }
    }

    pub fn is_enemy(self) -> bool {
        self != UnitKind::Player
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EnemyState {
    #[default]
    Wander,
    Chase,
    Attack,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TurnPhase {
    #[default]
    PlayerTurn,
    Resolving,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reward {
    pub experience: u32,
    pub gold: u32,
}

/// Fire-and-forget notifications for the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    UnitMoved { id: EntityId, from: Pos, to: Pos },
    UnitAttacked { attacker: EntityId, defender: EntityId, damage: i32, defender_hp_after: i32 },
    UnitDied { id: EntityId, kind: UnitKind, reward: Option<Reward> },
    PlayerLeveledUp { new_level: u32 },
    GameOver,
    SpawnFailed { kind: UnitKind, preferred: Pos },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CombatLogOutcome {
    Hit { damage: i32, defender_hp: i32, defender_max_hp: i32 },
    Killed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CombatLogEntry {
    pub attacker: UnitKind,
    pub defender: UnitKind,
    pub outcome: CombatLogOutcome,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerAction {
    Attacked { target: EntityId, damage: i32, killed: bool },
    Moved { from: Pos, to: Pos },
    Blocked,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnReport {
    pub player_action: PlayerAction,
    pub enemies_acted: u32,
    pub phase: TurnPhase,
    /// Clock sample the enemy phase ran on; journals keep it for replay.
    pub clock_ms: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("intent rejected: enemies are still resolving")]
    NotPlayerTurn,
    #[error("intent rejected: the game is over, restart to continue")]
    GameOver,
}
