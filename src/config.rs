use crate::grid::GridSpec;

/// World-unit side length of the playfield.
pub const GRID_SIZE: f32 = 400.0;

/// Cells per side.
pub const DIVISIONS: u32 = 8;

/// Default server bind address.
pub const DEFAULT_BIND: &str = "0.0.0.0:3000";

pub fn default_grid() -> GridSpec {
    GridSpec::new(GRID_SIZE, DIVISIONS)
}
