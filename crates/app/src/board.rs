//! One-way projection from grid cells to screen pixels.
//! The engine never sees pixel coordinates; hit feedback and sprites are
//! placed through this mapping only.

use skirmish_core::Pos;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardProjection {
    pub origin_x: f32,
    pub origin_y: f32,
    pub tile: f32,
    pub grid_size: usize,
}

impl BoardProjection {
    /// Largest square board that fits the panel, centered inside it.
    pub fn fit(x: f32, y: f32, width: f32, height: f32, grid_size: usize) -> Self {
        let cells = grid_size.max(1) as f32;
        let tile = (width.min(height) / cells).floor().max(1.0);
        let board = tile * cells;
        Self {
            origin_x: x + ((width - board) / 2.0).max(0.0),
            origin_y: y + ((height - board) / 2.0).max(0.0),
            tile,
            grid_size,
        }
    }

    /// Top-left corner of a cell.
    pub fn cell_origin(&self, pos: Pos) -> (f32, f32) {
        (self.origin_x + pos.x as f32 * self.tile, self.origin_y + pos.y as f32 * self.tile)
    }

    pub fn cell_center(&self, pos: Pos) -> (f32, f32) {
        let (x, y) = self.cell_origin(pos);
        (x + self.tile / 2.0, y + self.tile / 2.0)
    }

    pub fn board_size(&self) -> f32 {
        self.tile * self.grid_size as f32
    }
}
