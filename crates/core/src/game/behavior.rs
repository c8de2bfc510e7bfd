//! Enemy decision making: cooldown gate, then attack, chase or wander.

use super::*;
use crate::state::Unit;

/// Attack range is orthogonal adjacency only; a diagonal neighbour sits at
/// squared distance 2 and is chased instead.
pub(crate) fn choose_state(distance_squared: u32, vision_range: u32) -> EnemyState {
    if distance_squared <= 1 {
        EnemyState::Attack
    } else if distance_squared <= vision_range * vision_range {
        EnemyState::Chase
    } else {
        EnemyState::Wander
    }
}

pub(crate) fn cooldown_elapsed(last_action_ms: Option<u64>, now_ms: u64, delay_ms: u64) -> bool {
    last_action_ms.is_none_or(|last| now_ms.saturating_sub(last) >= delay_ms)
}

impl Game {
    /// Runs one decision for an enemy. Returns `false` when it is still
    /// cooling down (or gone), in which case nothing about it changes.
    pub(super) fn enemy_act(&mut self, id: EntityId, now_ms: u64) -> bool {
        let player_id = self.state.player_id;
        let player_pos = self.state.player().pos;
        let Some(unit) = self.state.units.get_mut(id) else {
            return false;
        };
        let pos = unit.pos;
        let Some(behavior) = unit.behavior_mut() else {
            return false;
        };
        if !cooldown_elapsed(behavior.last_action_ms, now_ms, behavior.move_delay_ms) {
            return false;
        }

        let state = choose_state(pos.distance_squared(player_pos), behavior.vision_range);
        behavior.state = state;
        behavior.last_action_ms = Some(now_ms);

        match state {
            EnemyState::Attack => {
                self.attack(id, player_id);
            }
            EnemyState::Chase => {
                self.try_move(id, Offset::toward(pos, player_pos));
            }
            EnemyState::Wander => self.wander(id),
        }
        true
    }

    fn wander(&mut self, id: EntityId) {
        if roll_percent(&mut self.rng, self.config.wander_turn_percent) {
            let fresh = random_offset(&mut self.rng);
            if let Some(behavior) = self.state.units.get_mut(id).and_then(Unit::behavior_mut) {
                behavior.wander = fresh;
            }
        }
        let offset =
            self.state.units.get(id).and_then(Unit::behavior).map_or(Offset::STAY, |b| b.wander);
        self.try_move(id, offset);
    }
}
