use std::collections::BTreeMap;

use macroquad::prelude::KeyCode;
use skirmish_core::{Direction, EntityId, Game, GameEvent, InputPayload, Pos, TurnPhase};
use tracing::debug;

/// Seconds a damage number stays on screen.
pub const POPUP_LIFETIME: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    #[default]
    Playing,
    GameOver,
}

/// Floating damage number anchored to the cell that was hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamagePopup {
    pub pos: Pos,
    pub damage: i32,
    pub age: f32,
}

#[derive(Default)]
pub struct AppState {
    pub mode: AppMode,
    /// Inputs accepted during the current frame's `tick()` call.
    pub accepted_inputs: Vec<InputPayload>,
    pub popups: Vec<DamagePopup>,
    // Last seen cell per unit so hits on units removed this frame still anchor.
    last_positions: BTreeMap<EntityId, Pos>,
}

pub fn direction_for_key(key: KeyCode) -> Option<Direction> {
    match key {
        KeyCode::Up | KeyCode::W => Some(Direction::UP),
        KeyCode::Down | KeyCode::S => Some(Direction::DOWN),
        KeyCode::Left | KeyCode::A => Some(Direction::LEFT),
        KeyCode::Right | KeyCode::D => Some(Direction::RIGHT),
        _ => None,
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies at most one intent for this frame: `R` restarts from any
    /// phase, otherwise the first movement key becomes the turn's direction.
    pub fn tick(&mut self, game: &mut Game, keys_pressed: &[KeyCode]) {
        self.accepted_inputs.clear();
        self.remember_positions(game);

        if keys_pressed.contains(&KeyCode::R) {
            game.restart();
            self.popups.clear();
            self.accepted_inputs.push(InputPayload::Restart);
        } else if self.mode == AppMode::Playing
            && let Some(direction) = keys_pressed.iter().copied().find_map(direction_for_key)
        {
            match game.submit_direction(direction) {
                Ok(report) => {
                    let offset = direction.offset();
                    self.accepted_inputs.push(InputPayload::Direction {
                        dx: offset.dx(),
                        dy: offset.dy(),
                        clock_ms: report.clock_ms,
                    });
                }
                Err(err) => debug!(%err, "intent rejected"),
            }
        }

        for event in game.drain_events() {
            self.apply_event(game, &event);
        }
        self.mode =
            if game.phase() == TurnPhase::GameOver { AppMode::GameOver } else { AppMode::Playing };
    }

    pub fn age_popups(&mut self, dt: f32) {
        for popup in &mut self.popups {
            popup.age += dt;
        }
        self.popups.retain(|popup| popup.age < POPUP_LIFETIME);
    }

    fn apply_event(&mut self, game: &Game, event: &GameEvent) {
        if let GameEvent::UnitAttacked { defender, damage, .. } = event {
            let current = game.state().units.get(*defender).map(|unit| unit.pos);
            if let Some(pos) = current.or_else(|| self.last_positions.get(defender).copied()) {
                self.popups.push(DamagePopup { pos, damage: *damage, age: 0.0 });
            }
        }
    }

    fn remember_positions(&mut self, game: &Game) {
        self.last_positions.clear();
        for unit in game.unit_snapshots() {
            self.last_positions.insert(unit.id, unit.pos);
        }
    }
}
