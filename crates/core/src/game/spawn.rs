//! Nearest free cell search for unit placement.

use super::*;

impl GameState {
    /// Whether a new unit may be placed at `pos`.
    pub fn is_valid_spawn(&self, pos: Pos) -> bool {
        self.grid.is_walkable(pos) && self.unit_at(pos, None).is_none()
    }

    /// Returns `preferred` when it is free, otherwise the first free cell on
    /// square rings of growing radius around it. Each ring is scanned with dx
    /// as the outer loop and dy as the inner loop, both from -r to r.
    pub fn find_safe_spawn(&self, preferred: Pos) -> Option<Pos> {
        if self.is_valid_spawn(preferred) {
            return Some(preferred);
        }

        let max_radius = self.max_ring_radius(preferred);
        for radius in 1..=max_radius {
            for dx in -radius..=radius {
                for dy in -radius..=radius {
                    if dx.abs() != radius && dy.abs() != radius {
                        continue;
                    }
                    let pos = Pos::new(preferred.x + dx, preferred.y + dy);
                    if self.is_valid_spawn(pos) {
                        return Some(pos);
                    }
                }
            }
        }
        None
    }

    /// Chebyshev distance from `from` to the farthest grid corner.
    fn max_ring_radius(&self, from: Pos) -> i32 {
        let right = i32::try_from(self.grid.width()).unwrap_or(i32::MAX) - 1;
        let bottom = i32::try_from(self.grid.height()).unwrap_or(i32::MAX) - 1;
        let dx = from.x.abs().max((right - from.x).abs());
        let dy = from.y.abs().max((bottom - from.y).abs());
        dx.max(dy)
    }
}
