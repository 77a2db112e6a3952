//! Continuous-world to grid-cell mapping.
//!
//! The playfield is a square of `grid_size` world units centred on the
//! origin, divided into `divisions x divisions` cells. A [`Cell`] is the
//! integer index pair of one square; world positions quantize onto cell
//! centres, so any two positions landing in the same square compare equal.

use serde::{Deserialize, Serialize};

/// Index of one grid square. `x` counts columns and `z` counts rows, both
/// starting at the negative-world corner of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub z: i32,
}

impl Cell {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

impl core::fmt::Display for Cell {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Dimensions of the playfield grid.
///
/// Quantisation is clamped, so every [`Cell`] this produces lies inside
/// `[0, divisions)` on both axes and its world centre inside
/// `[-grid_half + cell_half, grid_half - cell_half]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    grid_size: f32,
    divisions: u32,
}

impl GridSpec {
    /// `grid_size` is the world-unit side length, `divisions` the number of
    /// cells per side. Both must be positive.
    pub fn new(grid_size: f32, divisions: u32) -> Self {
        debug_assert!(grid_size > 0.0);
        debug_assert!(divisions > 0);
        Self {
            grid_size,
            divisions,
        }
    }

    pub fn grid_size(&self) -> f32 {
        self.grid_size
    }

    pub fn divisions(&self) -> u32 {
        self.divisions
    }

    pub fn cell_size(&self) -> f32 {
        self.grid_size / self.divisions as f32
    }

    /// Snap a world position to the cell whose centre is nearest, clamping
    /// each axis into the grid first. Idempotent: quantizing the centre of
    /// the returned cell yields the same cell.
    pub fn quantize(&self, x: f32, z: f32) -> Cell {
        Cell::new(self.quantize_axis(x), self.quantize_axis(z))
    }

    fn quantize_axis(&self, v: f32) -> i32 {
        let half = self.grid_size / 2.0;
        let cell = self.cell_size();
        let clamped = v.clamp(-half + cell / 2.0, half - cell / 2.0);
        ((clamped + half - cell / 2.0) / cell).round() as i32
    }

    /// World coordinates of a cell's centre.
    pub fn cell_center(&self, cell: Cell) -> (f32, f32) {
        let half = self.grid_size / 2.0;
        let cell_size = self.cell_size();
        (
            -half + cell_size / 2.0 + cell.x as f32 * cell_size,
            -half + cell_size / 2.0 + cell.z as f32 * cell_size,
        )
    }

    /// Whether a cell index lies inside the grid extent.
    pub fn contains(&self, cell: Cell) -> bool {
        let n = self.divisions as i32;
        (0..n).contains(&cell.x) && (0..n).contains(&cell.z)
    }

    /// Whether every cell of a candidate footprint lies inside the grid.
    pub fn contains_all<'a, I>(&self, cells: I) -> bool
    where
        I: IntoIterator<Item = &'a Cell>,
    {
        cells.into_iter().all(|c| self.contains(*c))
    }
}

/// Cells covered by a `width x length` footprint anchored at `anchor`.
/// Width extends along `x`, length along `z`; the anchor cell is included.
/// Produces exactly `width * length` distinct cells.
pub fn footprint_cells(anchor: Cell, width: u32, length: u32) -> Vec<Cell> {
    let mut cells = Vec::with_capacity((width * length) as usize);
    for dx in 0..width as i32 {
        for dz in 0..length as i32 {
            cells.push(Cell::new(anchor.x + dx, anchor.z + dz));
        }
    }
    cells
}
