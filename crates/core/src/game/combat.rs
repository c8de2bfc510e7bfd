//! Damage resolution, kill rewards and death handling.

use tracing::{debug, info};

use super::*;
use crate::content::kill_reward;

/// Damage dealt by one blow; defense halves (rounding down) before it is
/// subtracted, and every hit deals at least one point.
pub fn damage_for(attack: i32, defense: i32) -> i32 {
    (attack - defense.div_euclid(2)).max(1)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackOutcome {
    pub damage: i32,
    pub survived: bool,
}

impl Game {
    /// Resolves one blow. Returns `None` when either unit no longer exists.
    pub fn attack(&mut self, attacker: EntityId, defender: EntityId) -> Option<AttackOutcome> {
        let (attack, attacker_kind) = {
            let unit = self.state.units.get(attacker)?;
            (unit.attack, unit.kind)
        };
        let target = self.state.units.get_mut(defender)?;
        let damage = damage_for(attack, target.defense);
        debug!(
            attacker = attacker_kind.label(),
            attack,
            defender = target.kind.label(),
            defense = target.defense,
            damage,
            "attack resolved"
        );

        let survived = target.take_damage(damage);
        let entry = CombatLogEntry {
            attacker: attacker_kind,
            defender: target.kind,
            outcome: CombatLogOutcome::Hit {
                damage,
                defender_hp: target.hp,
                defender_max_hp: target.max_hp,
            },
        };
        let defender_hp_after = target.hp;
        self.push_log(entry);
        self.events.push(GameEvent::UnitAttacked { attacker, defender, damage, defender_hp_after });

        if !survived {
            self.handle_death(defender);
        }
        Some(AttackOutcome { damage, survived })
    }

    fn handle_death(&mut self, id: EntityId) {
        if id == self.state.player_id {
            self.phase = TurnPhase::GameOver;
            info!(turn = self.turn, "player died");
            self.events.push(GameEvent::UnitDied { id, kind: UnitKind::Player, reward: None });
            self.events.push(GameEvent::GameOver);
            return;
        }

        let Some(dead) = self.state.remove_unit(id) else {
            return;
        };
        let reward = kill_reward(dead.kind);
        if let Some(reward) = reward {
            let player = self.state.player_mut();
            player.add_gold(reward.gold);
            if let Some(new_level) = player.gain_experience(reward.experience) {
                info!(new_level, "player leveled up");
                self.events.push(GameEvent::PlayerLeveledUp { new_level });
            }
        }
        self.push_log(CombatLogEntry {
            attacker: UnitKind::Player,
            defender: dead.kind,
            outcome: CombatLogOutcome::Killed,
        });
        self.events.push(GameEvent::UnitDied { id, kind: dead.kind, reward });
    }
}
