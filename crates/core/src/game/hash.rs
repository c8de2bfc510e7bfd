//! Stable snapshot hashing for deterministic verification.
//! Covers everything a replay must reproduce; pending events are excluded.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;
use crate::state::Unit;

impl Game {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.turn);
        hasher.write_u8(match self.phase {
            TurnPhase::PlayerTurn => 0,
            TurnPhase::Resolving => 1,
            TurnPhase::GameOver => 2,
        });

        for pos in self.state.grid.positions() {
            if let Some(cell) = self.state.grid.cell(pos) {
                for (_, kind) in cell.layers() {
                    hasher.write_u8(kind as u8);
                }
                hasher.write_u8(0xFF);
            }
        }

        write_unit(&mut hasher, self.state.player());
        if let Some(progression) = self.state.player().progression() {
            hasher.write_u32(progression.level);
            hasher.write_u32(progression.experience);
            hasher.write_u32(progression.gold);
        }
        hasher.write_usize(self.state.roster.len());
        for id in &self.state.roster {
            let Some(enemy) = self.state.units.get(*id) else {
                continue;
            };
            write_unit(&mut hasher, enemy);
            if let Some(behavior) = enemy.behavior() {
                hasher.write_u8(behavior.state as u8);
                hasher.write_u64(behavior.last_action_ms.unwrap_or(u64::MAX));
                hasher.write_i8(behavior.wander.dx());
                hasher.write_i8(behavior.wander.dy());
            }
        }
        hasher.finish()
    }
}

fn write_unit(hasher: &mut Xxh3, unit: &Unit) {
    hasher.write_u8(unit.kind as u8);
    hasher.write_i32(unit.pos.x);
    hasher.write_i32(unit.pos.y);
    hasher.write_i32(unit.hp);
    hasher.write_i32(unit.max_hp);
    hasher.write_i32(unit.attack);
    hasher.write_i32(unit.defense);
}
