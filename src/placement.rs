//! Placement validation: accepts or rejects a proposed ship pose against
//! grid bounds and the owner's occupancy map.
//!
//! Every operation either commits fully (release old cells, claim new,
//! update the ship's pose) or leaves ship and map untouched and reports
//! which check failed.

use serde::{Deserialize, Serialize};

use crate::grid::{footprint_cells, Cell, GridSpec};
use crate::occupancy::{ConflictError, OccupancyMap};
use crate::ship::{Fleet, Rotation, ShipClass, ShipId};

/// A proposed pose for one ship.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipPose {
    pub class: ShipClass,
    pub anchor: Cell,
    pub rotation: Rotation,
}

/// Why a placement or move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// Part of the footprint falls outside the grid.
    OutOfBounds,
    /// Part of the footprint is held by another ship in the same fleet.
    Overlap,
    /// The ship id does not exist in this fleet.
    UnknownShip(ShipId),
    /// Occupancy invariant broken after validation passed. A bug, not a
    /// user error.
    Conflict(ConflictError),
}

impl core::fmt::Display for PlacementError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PlacementError::OutOfBounds => write!(f, "footprint extends outside the grid"),
            PlacementError::Overlap => write!(f, "footprint overlaps another ship"),
            PlacementError::UnknownShip(id) => write!(f, "no ship {:?} in fleet", id),
            PlacementError::Conflict(e) => write!(f, "occupancy conflict: {}", e),
        }
    }
}

impl std::error::Error for PlacementError {}

impl From<ConflictError> for PlacementError {
    fn from(e: ConflictError) -> Self {
        PlacementError::Conflict(e)
    }
}

/// Why a full fleet submission was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FleetError {
    /// The submission does not field every class exactly once.
    WrongShipSet,
    /// One ship's pose failed validation.
    Ship {
        class: ShipClass,
        error: PlacementError,
    },
}

impl core::fmt::Display for FleetError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FleetError::WrongShipSet => {
                write!(f, "fleet must field each of the five classes exactly once")
            }
            FleetError::Ship { class, error } => {
                write!(f, "{}: {}", class.name(), error)
            }
        }
    }
}

impl std::error::Error for FleetError {}

fn candidate_cells(pose: &ShipPose) -> Vec<Cell> {
    let (w, l) = pose.class.footprint();
    let (w, l) = match pose.rotation {
        Rotation::R0 => (w, l),
        Rotation::R90 => (l, w),
    };
    footprint_cells(pose.anchor, w, l)
}

fn check(
    spec: &GridSpec,
    map: &OccupancyMap,
    cells: &[Cell],
    own: Option<ShipId>,
) -> Result<(), PlacementError> {
    if !spec.contains_all(cells) {
        return Err(PlacementError::OutOfBounds);
    }
    if cells.iter().any(|c| map.is_occupied(*c, own)) {
        return Err(PlacementError::Overlap);
    }
    Ok(())
}

/// Validate a pose and add a new ship to the fleet, claiming its cells.
pub fn place_ship(
    spec: &GridSpec,
    fleet: &mut Fleet,
    map: &mut OccupancyMap,
    pose: ShipPose,
) -> Result<ShipId, PlacementError> {
    let cells = candidate_cells(&pose);
    check(spec, map, &cells, None)?;
    let id = fleet.add(pose.class, pose.anchor, pose.rotation);
    map.claim(id, &cells)?;
    Ok(id)
}

/// Validate a new pose for an existing ship and commit it, or leave the
/// ship's anchor, rotation and claimed cells unchanged.
pub fn move_ship(
    spec: &GridSpec,
    fleet: &mut Fleet,
    map: &mut OccupancyMap,
    id: ShipId,
    anchor: Cell,
    rotation: Rotation,
) -> Result<(), PlacementError> {
    let ship = fleet.ship(id).ok_or(PlacementError::UnknownShip(id))?;
    let pose = ShipPose {
        class: ship.class(),
        anchor,
        rotation,
    };
    let cells = candidate_cells(&pose);
    check(spec, map, &cells, Some(id))?;
    map.release(id);
    map.claim(id, &cells)?;
    if let Some(ship) = fleet.ship_mut(id) {
        ship.set_pose(anchor, rotation);
    }
    Ok(())
}

/// Rotate a ship 90 degrees in place, swapping its footprint axes. On
/// failure the pose is unchanged and the failed check is reported.
pub fn rotate_ship(
    spec: &GridSpec,
    fleet: &mut Fleet,
    map: &mut OccupancyMap,
    id: ShipId,
) -> Result<(), PlacementError> {
    let ship = fleet.ship(id).ok_or(PlacementError::UnknownShip(id))?;
    let anchor = ship.anchor();
    let rotation = ship.rotation().rotated();
    move_ship(spec, fleet, map, id, anchor, rotation)
}

/// Validate a complete submission and build the fleet plus its occupancy
/// map from scratch. Used when a player finalises placement.
pub fn assemble_fleet(
    spec: &GridSpec,
    poses: &[ShipPose],
) -> Result<(Fleet, OccupancyMap), FleetError> {
    if poses.len() != ShipClass::ALL.len() {
        return Err(FleetError::WrongShipSet);
    }
    for class in ShipClass::ALL {
        if poses.iter().filter(|p| p.class == class).count() != 1 {
            return Err(FleetError::WrongShipSet);
        }
    }
    let mut fleet = Fleet::new();
    let mut map = OccupancyMap::new();
    for pose in poses {
        place_ship(spec, &mut fleet, &mut map, *pose).map_err(|error| FleetError::Ship {
            class: pose.class,
            error,
        })?;
    }
    Ok((fleet, map))
}
