//! Read-only views for renderers and tools.
//! Snapshots are plain owned values so callers never hold borrows into the session.

use super::*;
use crate::content::XP_PER_LEVEL;
use crate::state::Unit;
use crate::terrain::{DepthCategory, LayerId, TerrainKind, layer_depth, variation_for};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitSnapshot {
    pub id: EntityId,
    pub kind: UnitKind,
    pub pos: Pos,
    pub hp: i32,
    pub max_hp: i32,
    /// `None` for the player.
    pub enemy_state: Option<EnemyState>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerSnapshot {
    pub level: u32,
    pub experience: u32,
    pub experience_to_next: u32,
    pub gold: u32,
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub defense: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerSnapshot {
    pub layer: LayerId,
    pub terrain: TerrainKind,
    pub depth: DepthCategory,
    pub variation: u8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellSnapshot {
    pub pos: Pos,
    pub walkable: bool,
    /// Bottom layer first.
    pub layers: Vec<LayerSnapshot>,
}

impl Game {
    pub fn grid_size(&self) -> usize {
        self.state.grid.width()
    }

    pub fn cell_snapshot(&self, pos: Pos) -> Option<CellSnapshot> {
        let cell = self.state.grid.cell(pos)?;
        let mut layers: Vec<LayerSnapshot> = cell
            .layers()
            .map(|(layer, terrain)| LayerSnapshot {
                layer,
                terrain,
                depth: layer_depth(layer),
                variation: variation_for(pos, terrain.descriptor().variations),
            })
            .collect();
        layers.sort_by_key(|layer| layer.depth);
        Some(CellSnapshot { pos, walkable: cell.is_walkable(), layers })
    }

    /// Every cell, row by row.
    pub fn terrain_snapshot(&self) -> Vec<CellSnapshot> {
        self.state.grid.positions().filter_map(|pos| self.cell_snapshot(pos)).collect()
    }

    /// The player first, then living enemies in spawn order.
    pub fn unit_snapshots(&self) -> Vec<UnitSnapshot> {
        let player = self.state.units.get(self.state.player_id);
        let enemies = self.state.roster.iter().filter_map(|id| self.state.units.get(*id));
        player.into_iter().chain(enemies).map(unit_snapshot).collect()
    }

    pub fn player_snapshot(&self) -> PlayerSnapshot {
        let player = self.state.player();
        let (level, experience, gold) = player
            .progression()
            .map_or((1, 0, 0), |progression| {
                (progression.level, progression.experience, progression.gold)
            });
        PlayerSnapshot {
            level,
            experience,
            experience_to_next: level * XP_PER_LEVEL,
            gold,
            hp: player.hp,
            max_hp: player.max_hp,
            attack: player.attack,
            defense: player.defense,
        }
    }
}

fn unit_snapshot(unit: &Unit) -> UnitSnapshot {
    UnitSnapshot {
        id: unit.id,
        kind: unit.kind,
        pos: unit.pos,
        hp: unit.hp,
        max_hp: unit.max_hp,
        enemy_state: unit.behavior().map(|behavior| behavior.state),
    }
}
