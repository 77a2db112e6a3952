//! Ship and fleet model: footprints, rotation and hit state.

use serde::{Deserialize, Serialize};

use crate::grid::{footprint_cells, Cell};

/// The five hull classes of a fleet. Footprints are fixed per class,
/// derived from the cell span of each hull model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipClass {
    Flagship,
    Destroyer,
    Submarine,
    Gunboat,
    Drone,
}

impl ShipClass {
    /// Every class, in the order a fleet lists them.
    pub const ALL: [ShipClass; 5] = [
        ShipClass::Flagship,
        ShipClass::Destroyer,
        ShipClass::Submarine,
        ShipClass::Gunboat,
        ShipClass::Drone,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShipClass::Flagship => "Flagship",
            ShipClass::Destroyer => "Destroyer",
            ShipClass::Submarine => "Submarine",
            ShipClass::Gunboat => "Gunboat",
            ShipClass::Drone => "Drone",
        }
    }

    /// Hull model reference used by the presentation layer and the store.
    pub fn model_path(self) -> &'static str {
        match self {
            ShipClass::Flagship => "bigShip2.glb",
            ShipClass::Destroyer => "blurudestroyer.glb",
            ShipClass::Submarine => "submarine.glb",
            ShipClass::Gunboat => "3boxship.glb",
            ShipClass::Drone => "maritimedrone.glb",
        }
    }

    /// Unrotated footprint as `(width, length)` in cells.
    pub fn footprint(self) -> (u32, u32) {
        match self {
            ShipClass::Flagship => (1, 5),
            ShipClass::Destroyer => (1, 4),
            ShipClass::Submarine => (1, 3),
            ShipClass::Gunboat => (1, 3),
            ShipClass::Drone => (1, 2),
        }
    }

    /// Total number of cells the hull occupies.
    pub fn cell_count(self) -> u32 {
        let (w, l) = self.footprint();
        w * l
    }
}

/// Orientation of a ship's footprint. `R90` swaps width and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rotation {
    R0,
    R90,
}

impl Rotation {
    pub fn rotated(self) -> Self {
        match self {
            Rotation::R0 => Rotation::R90,
            Rotation::R90 => Rotation::R0,
        }
    }
}

/// Identity of a ship within one fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShipId(pub u8);

/// One placed ship: class, pose and accumulated hits.
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    id: ShipId,
    class: ShipClass,
    anchor: Cell,
    rotation: Rotation,
    hits: u32,
}

impl Ship {
    pub fn new(id: ShipId, class: ShipClass, anchor: Cell, rotation: Rotation) -> Self {
        Self {
            id,
            class,
            anchor,
            rotation,
            hits: 0,
        }
    }

    pub fn id(&self) -> ShipId {
        self.id
    }

    pub fn class(&self) -> ShipClass {
        self.class
    }

    pub fn anchor(&self) -> Cell {
        self.anchor
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    /// Footprint size with rotation applied.
    pub fn oriented_size(&self) -> (u32, u32) {
        let (w, l) = self.class.footprint();
        match self.rotation {
            Rotation::R0 => (w, l),
            Rotation::R90 => (l, w),
        }
    }

    /// Every cell the hull currently occupies.
    pub fn cells(&self) -> Vec<Cell> {
        let (w, l) = self.oriented_size();
        footprint_cells(self.anchor, w, l)
    }

    pub fn cell_count(&self) -> u32 {
        self.class.cell_count()
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Sunk exactly when every footprint cell has been hit.
    pub fn is_sunk(&self) -> bool {
        self.hits == self.cell_count()
    }

    pub(crate) fn set_pose(&mut self, anchor: Cell, rotation: Rotation) {
        self.anchor = anchor;
        self.rotation = rotation;
    }
}

/// Ordered collection of one player's ships.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fleet {
    ships: Vec<Ship>,
}

impl Fleet {
    pub fn new() -> Self {
        Self { ships: Vec::new() }
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.iter().find(|s| s.id() == id)
    }

    pub fn ship_mut(&mut self, id: ShipId) -> Option<&mut Ship> {
        self.ships.iter_mut().find(|s| s.id() == id)
    }

    /// Add a ship under the next free id. The pose must already have been
    /// validated against the owner's occupancy map.
    pub(crate) fn add(&mut self, class: ShipClass, anchor: Cell, rotation: Rotation) -> ShipId {
        let id = ShipId(self.ships.len() as u8);
        self.ships.push(Ship::new(id, class, anchor, rotation));
        id
    }

    /// A fleet is complete when it fields every class exactly once.
    pub fn is_complete(&self) -> bool {
        self.ships.len() == ShipClass::ALL.len()
            && ShipClass::ALL
                .iter()
                .all(|c| self.ships.iter().filter(|s| s.class() == *c).count() == 1)
    }

    /// Whether every ship in the fleet is sunk. An empty fleet is never
    /// considered destroyed.
    pub fn all_sunk(&self) -> bool {
        !self.ships.is_empty() && self.ships.iter().all(Ship::is_sunk)
    }
}
