//! Attack resolution against a defending fleet.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::grid::Cell;
use crate::occupancy::OccupancyMap;
use crate::ship::{Fleet, ShipId};

/// Result of one resolved attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackOutcome {
    pub cell: Cell,
    pub hit: bool,
    pub sunk: bool,
    pub game_over: bool,
}

/// Why an attack was rejected. Rejected attacks change no state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackError {
    /// The cell was already attacked this match.
    DuplicateAttack,
    /// Occupancy map referenced a ship the fleet does not know. A bug,
    /// not a user error.
    UnknownShip(ShipId),
}

impl core::fmt::Display for AttackError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AttackError::DuplicateAttack => write!(f, "cell was already attacked"),
            AttackError::UnknownShip(id) => {
                write!(f, "occupancy references unknown ship {:?}", id)
            }
        }
    }
}

impl std::error::Error for AttackError {}

/// Resolve an attack on `cell` against the defender's fleet and map.
///
/// The cell is recorded in `attacked` whether it hits or misses, so a
/// repeat of either is rejected as [`AttackError::DuplicateAttack`]. A hit
/// increments the struck ship's counter; `sunk` is set when the counter
/// reaches the ship's full footprint, and `game_over` when every ship in
/// the fleet is sunk.
pub fn resolve_attack(
    cell: Cell,
    fleet: &mut Fleet,
    map: &OccupancyMap,
    attacked: &mut HashSet<Cell>,
) -> Result<AttackOutcome, AttackError> {
    if attacked.contains(&cell) {
        return Err(AttackError::DuplicateAttack);
    }
    let occupant = map.occupant(cell);
    if let Some(id) = occupant {
        // Resolve the ship before mutating the attacked set so a bad map
        // leaves no trace.
        if fleet.ship(id).is_none() {
            return Err(AttackError::UnknownShip(id));
        }
    }
    attacked.insert(cell);
    match occupant {
        None => Ok(AttackOutcome {
            cell,
            hit: false,
            sunk: false,
            game_over: false,
        }),
        Some(id) => {
            let ship = fleet.ship_mut(id).ok_or(AttackError::UnknownShip(id))?;
            ship.record_hit();
            let sunk = ship.is_sunk();
            let game_over = sunk && fleet.all_sunk();
            Ok(AttackOutcome {
                cell,
                hit: true,
                sunk,
                game_over,
            })
        }
    }
}
