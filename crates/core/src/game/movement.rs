use super::*;

impl Game {
    /// Moves a unit by one step. Fails without side effects when the target
    /// is out of bounds, blocked by terrain or held by another unit. The zero
    /// offset always succeeds and emits nothing.
    pub fn try_move(&mut self, id: EntityId, offset: Offset) -> bool {
        let Some(unit) = self.state.units.get(id) else {
            return false;
        };
        if offset.is_stay() {
            return true;
        }
        let from = unit.pos;
        let to = from.offset(offset);
        if !self.state.can_enter(to, id) {
            return false;
        }
        self.state.units[id].pos = to;
        self.events.push(GameEvent::UnitMoved { id, from, to });
        true
    }
}
