//! Turn sequencing: one player intent, then one pass over the enemy roster.

use tracing::info;

use super::*;

impl Game {
    /// Applies the player's intent and resolves the enemy phase that follows.
    /// The clock is sampled once per accepted intent. Rejected intents leave
    /// the session untouched.
    pub fn submit_direction(&mut self, direction: Direction) -> Result<TurnReport, GameError> {
        match self.phase {
            TurnPhase::PlayerTurn => {}
            TurnPhase::Resolving => return Err(GameError::NotPlayerTurn),
            TurnPhase::GameOver => return Err(GameError::GameOver),
        }

        let clock_ms = self.clock.now_ms();
        let player_action = self.player_act(direction);
        let enemies_acted =
            if self.phase == TurnPhase::GameOver { 0 } else { self.resolve_enemy_phase(clock_ms) };

        if self.phase != TurnPhase::GameOver {
            self.phase = TurnPhase::PlayerTurn;
            self.turn += 1;
        }
        Ok(TurnReport { player_action, enemies_acted, phase: self.phase, clock_ms })
    }

    /// Restores the session to how it looked right after setup: same grid,
    /// same spawns, same random stream. Allowed from any phase.
    pub fn restart(&mut self) {
        self.state = self.initial_state.clone();
        self.rng = self.initial_rng.clone();
        self.phase = TurnPhase::PlayerTurn;
        self.turn = 0;
        self.combat_log.clear();
        self.events = self.setup_events.clone();
        info!(seed = self.seed, "session restarted");
    }

    fn player_act(&mut self, direction: Direction) -> PlayerAction {
        let player_id = self.state.player_id;
        let from = self.state.player().pos;
        let target = from.offset(direction.offset());

        if let Some(enemy) = self.state.enemy_at(target) {
            return match self.attack(player_id, enemy) {
                Some(outcome) => PlayerAction::Attacked {
                    target: enemy,
                    damage: outcome.damage,
                    killed: !outcome.survived,
                },
                None => PlayerAction::Blocked,
            };
        }

        if self.try_move(player_id, direction.offset()) {
            PlayerAction::Moved { from, to: target }
        } else {
            PlayerAction::Blocked
        }
    }

    fn resolve_enemy_phase(&mut self, now_ms: u64) -> u32 {
        self.phase = TurnPhase::Resolving;
        let roster = self.state.roster.clone();
        let mut acted = 0;
        for id in roster {
            if self.enemy_act(id, now_ms) {
                acted += 1;
            }
            if self.phase == TurnPhase::GameOver {
                break;
            }
        }
        acted
    }
}
