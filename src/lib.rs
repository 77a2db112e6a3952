mod attack;
pub mod bot;
mod config;
pub mod connection;
mod grid;
mod logging;
mod matchmaker;
mod occupancy;
mod placement;
pub mod protocol;
mod server;
mod session;
mod ship;
mod store;

pub use attack::{resolve_attack, AttackError, AttackOutcome};
pub use config::{default_grid, DEFAULT_BIND, DIVISIONS, GRID_SIZE};
pub use grid::{footprint_cells, Cell, GridSpec};
pub use logging::init_logging;
pub use matchmaker::{Matchmaker, MatchmakerError};
pub use occupancy::{ConflictError, OccupancyMap};
pub use placement::{
    assemble_fleet, move_ship, place_ship, rotate_ship, FleetError, PlacementError, ShipPose,
};
pub use server::Server;
pub use session::{Outgoing, Phase, Room, SessionError};
pub use ship::{Fleet, Rotation, Ship, ShipClass, ShipId};
pub use store::{ShipStore, StoredShip, Vec3};
