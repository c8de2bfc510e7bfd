use slotmap::SlotMap;

use crate::content::{
    LEVEL_UP_ATTACK, LEVEL_UP_DEFENSE, LEVEL_UP_MAX_HP, XP_PER_LEVEL, get_unit_stats,
};
use crate::terrain::{Cell, TerrainError, TerrainKind};
use crate::types::*;

#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: usize, height: usize, base: TerrainKind) -> Result<Self, TerrainError> {
        let cell = Cell::new(base)?;
        Ok(Self { width, height, cells: vec![cell; width * height] })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn cell(&self, pos: Pos) -> Option<&Cell> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.cells.get(self.index(pos))
    }

    pub fn cell_mut(&mut self, pos: Pos) -> Option<&mut Cell> {
        if !self.in_bounds(pos) {
            return None;
        }
        let idx = self.index(pos);
        self.cells.get_mut(idx)
    }

    /// Out-of-bounds positions are never walkable.
    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.cell(pos).is_some_and(Cell::is_walkable)
    }

    /// Out-of-bounds writes are ignored.
    pub fn set_base(&mut self, pos: Pos, kind: TerrainKind) -> Result<(), TerrainError> {
        match self.cell_mut(pos) {
            Some(cell) => cell.set_base(kind),
            None => Ok(()),
        }
    }

    /// Out-of-bounds writes are ignored.
    pub fn add_object(&mut self, pos: Pos, kind: TerrainKind) -> Result<(), TerrainError> {
        match self.cell_mut(pos) {
            Some(cell) => cell.add_object(kind),
            None => Ok(()),
        }
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| Pos::new(x as i32, y as i32)))
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Progression {
    pub level: u32,
    pub experience: u32,
    pub gold: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Behavior {
    pub state: EnemyState,
    pub vision_range: u32,
    pub move_delay_ms: u64,
    /// `None` until the first action, so a fresh enemy is never on cooldown.
    pub last_action_ms: Option<u64>,
    pub wander: Offset,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Role {
    Player(Progression),
    Enemy(Behavior),
}

#[derive(Clone, Debug)]
pub struct Unit {
    pub id: EntityId,
    pub kind: UnitKind,
    pub pos: Pos,
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub move_range: u8,
    pub is_hostile: bool,
    pub role: Role,
}

impl Unit {
    pub fn player(pos: Pos) -> Self {
        let stats = get_unit_stats(UnitKind::Player);
        Self {
            id: EntityId::default(),
            kind: UnitKind::Player,
            pos,
            hp: stats.hp,
            max_hp: stats.hp,
            attack: stats.attack,
            defense: stats.defense,
            move_range: 1,
            is_hostile: false,
            role: Role::Player(Progression { level: 1, experience: 0, gold: 0 }),
        }
    }

    pub fn enemy(kind: UnitKind, pos: Pos, wander: Offset) -> Self {
        let stats = get_unit_stats(kind);
        Self {
            id: EntityId::default(),
            kind,
            pos,
            hp: stats.hp,
            max_hp: stats.hp,
            attack: stats.attack,
            defense: stats.defense,
            move_range: 1,
            is_hostile: true,
            role: Role::Enemy(Behavior {
                state: EnemyState::Wander,
                vision_range: stats.vision_range,
                move_delay_ms: stats.move_delay_ms,
                last_action_ms: None,
                wander,
            }),
        }
    }

    pub fn progression(&self) -> Option<&Progression> {
        match &self.role {
            Role::Player(progression) => Some(progression),
            Role::Enemy(_) => None,
        }
    }

    pub fn behavior(&self) -> Option<&Behavior> {
        match &self.role {
            Role::Enemy(behavior) => Some(behavior),
            Role::Player(_) => None,
        }
    }

    pub fn behavior_mut(&mut self) -> Option<&mut Behavior> {
        match &mut self.role {
            Role::Enemy(behavior) => Some(behavior),
            Role::Player(_) => None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Returns whether the unit is still alive afterwards.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.hp = (self.hp - amount).max(0);
        self.is_alive()
    }

    pub fn heal(&mut self, amount: i32) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }

    /// Adds experience and applies at most one level-up. Returns the new
    /// level when one happened. No-op for enemies.
    pub fn gain_experience(&mut self, amount: u32) -> Option<u32> {
        let Role::Player(progression) = &mut self.role else {
            return None;
        };
        progression.experience += amount;
        if progression.experience < progression.level * XP_PER_LEVEL {
            return None;
        }
        progression.level += 1;
        progression.experience = 0;
        let new_level = progression.level;
        self.max_hp += LEVEL_UP_MAX_HP;
        self.hp = self.max_hp;
        self.attack += LEVEL_UP_ATTACK;
        self.defense += LEVEL_UP_DEFENSE;
        Some(new_level)
    }

    pub fn add_gold(&mut self, amount: u32) {
        if let Role::Player(progression) = &mut self.role {
            progression.gold += amount;
        }
    }
}

#[derive(Clone, Debug)]
pub struct GameState {
    pub grid: Grid,
    pub units: SlotMap<EntityId, Unit>,
    pub player_id: EntityId,
    /// Living enemies in spawn order; the enemy phase walks this list.
    pub roster: Vec<EntityId>,
}

impl GameState {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            units: SlotMap::with_key(),
            player_id: EntityId::default(),
            roster: Vec::new(),
        }
    }

    pub fn insert_unit(&mut self, unit: Unit) -> EntityId {
        let is_player = unit.kind == UnitKind::Player;
        let id = self.units.insert(unit);
        self.units[id].id = id;
        if is_player {
            self.player_id = id;
        } else {
            self.roster.push(id);
        }
        id
    }

    pub fn remove_unit(&mut self, id: EntityId) -> Option<Unit> {
        self.roster.retain(|enemy| *enemy != id);
        self.units.remove(id)
    }

    pub fn player(&self) -> &Unit {
        &self.units[self.player_id]
    }

    pub fn player_mut(&mut self) -> &mut Unit {
        &mut self.units[self.player_id]
    }

    pub fn unit_at(&self, pos: Pos, exclude: Option<EntityId>) -> Option<EntityId> {
        self.units
            .iter()
            .find(|(id, unit)| Some(*id) != exclude && unit.pos == pos)
            .map(|(id, _)| id)
    }

    pub fn enemy_at(&self, pos: Pos) -> Option<EntityId> {
        self.roster
            .iter()
            .copied()
            .find(|id| self.units.get(*id).is_some_and(|unit| unit.pos == pos))
    }

    /// Whether `mover` may step onto `pos`: in bounds, walkable, and not
    /// held by any other unit.
    pub fn can_enter(&self, pos: Pos, mover: EntityId) -> bool {
        self.grid.is_walkable(pos) && self.unit_at(pos, Some(mover)).is_none()
    }
}
