//! Per-fleet occupancy map: which ship holds which cell.
//!
//! One map exists per player; attacks resolve against the defender's map
//! only. Keys are integer [`Cell`] values, never formatted coordinates.

use std::collections::HashMap;

use crate::grid::Cell;
use crate::ship::ShipId;

/// A cell was already held by a different ship when a claim was made.
/// Callers validate overlap before claiming, so seeing this error means an
/// internal invariant was broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConflictError {
    pub cell: Cell,
    pub held_by: ShipId,
}

impl core::fmt::Display for ConflictError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "cell {} already claimed by ship {:?}", self.cell, self.held_by)
    }
}

impl std::error::Error for ConflictError {}

/// Mutable table from cell to occupying ship, scoped to one fleet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OccupancyMap {
    cells: HashMap<Cell, ShipId>,
}

impl OccupancyMap {
    pub fn new() -> Self {
        Self {
            cells: HashMap::new(),
        }
    }

    /// Record `ship` as the occupant of every cell in `cells`.
    ///
    /// Fails without mutating if any cell is held by a *different* ship;
    /// re-claiming cells already held by `ship` is a no-op.
    pub fn claim(&mut self, ship: ShipId, cells: &[Cell]) -> Result<(), ConflictError> {
        for cell in cells {
            if let Some(&held_by) = self.cells.get(cell) {
                if held_by != ship {
                    return Err(ConflictError {
                        cell: *cell,
                        held_by,
                    });
                }
            }
        }
        for cell in cells {
            self.cells.insert(*cell, ship);
        }
        Ok(())
    }

    /// Remove every cell currently mapped to `ship`.
    pub fn release(&mut self, ship: ShipId) {
        self.cells.retain(|_, occupant| *occupant != ship);
    }

    /// Whether a cell is claimed by any ship other than `excluding`.
    pub fn is_occupied(&self, cell: Cell, excluding: Option<ShipId>) -> bool {
        match self.cells.get(&cell) {
            Some(occupant) => Some(*occupant) != excluding,
            None => false,
        }
    }

    /// The ship holding a cell, if any.
    pub fn occupant(&self, cell: Cell) -> Option<ShipId> {
        self.cells.get(&cell).copied()
    }

    /// Number of claimed cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Drop every entry. Only called when the match ends.
    pub fn clear(&mut self) {
        self.cells.clear();
    }
}
