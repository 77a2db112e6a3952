//! Wire messages exchanged between clients and the match server.
//!
//! Transport-agnostic: anything that can carry serde-encoded frames in both
//! directions works. Every rejected action is answered with an explicit
//! [`Rejection`] to the originating client only.

use serde::{Deserialize, Serialize};

use crate::attack::AttackError;
use crate::grid::Cell;
use crate::placement::{FleetError, PlacementError, ShipPose};

/// Server-assigned connection identity.
pub type ClientId = u64;

/// Identity of one two-player room.
pub type RoomId = u64;

/// A player's final placement submission, one pose per ship. Cells are
/// recomputed and validated server-side; clients are never trusted with
/// occupancy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetPlacement {
    pub ships: Vec<ShipPose>,
}

/// Messages a client sends to the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClientMessage {
    /// Enter matchmaking.
    JoinGame,
    /// Scene finished loading; relayed to the opponent only.
    SceneLoaded,
    /// Submit final ship placement for validation.
    ShipsPlaced(FleetPlacement),
    /// Attack a world-space position, quantized server-side.
    Attack { x: f32, z: f32 },
}

/// Messages the server sends to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ServerMessage {
    /// Assigns this connection its identity.
    ConnectionConfirmed { client_id: ClientId },
    /// The joined room has one player; waiting for a second.
    WaitingForOpponent,
    /// The room is full and placement may begin.
    GameStart {
        player1: ClientId,
        player2: ClientId,
        room_id: RoomId,
    },
    /// The opponent's scene finished loading.
    OpponentSceneReady,
    /// Both fleets validated; the game begins.
    AllShipsPlaced,
    /// Declares whose turn it is.
    PlayerTurn(ClientId),
    /// Outcome of a resolved attack, broadcast to both players.
    AttackResult {
        attacker: ClientId,
        cell: Cell,
        hit: bool,
        sunk: bool,
        game_over: bool,
    },
    /// A room member disconnected; the room is torn down.
    PlayerDisconnected(ClientId),
    /// An action was rejected; no state changed.
    Rejected(Rejection),
}

/// Reasons the server refuses an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    OutOfBounds,
    Overlap,
    WrongShipSet,
    NotYourTurn,
    DuplicateAttack,
    NotInRoom,
    NoOpponent,
    AlreadyInRoom,
    WrongPhase,
    /// Internal invariant violation; reported to the client without detail.
    Internal,
}

impl core::fmt::Display for Rejection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let reason = match self {
            Rejection::OutOfBounds => "placement extends outside the grid",
            Rejection::Overlap => "placement overlaps another ship",
            Rejection::WrongShipSet => "fleet must field each class exactly once",
            Rejection::NotYourTurn => "not your turn",
            Rejection::DuplicateAttack => "cell was already attacked",
            Rejection::NotInRoom => "not in an active room",
            Rejection::NoOpponent => "no opponent in the room",
            Rejection::AlreadyInRoom => "already in a room",
            Rejection::WrongPhase => "action not valid in the current phase",
            Rejection::Internal => "internal error",
        };
        f.write_str(reason)
    }
}

impl From<PlacementError> for Rejection {
    fn from(e: PlacementError) -> Self {
        match e {
            PlacementError::OutOfBounds => Rejection::OutOfBounds,
            PlacementError::Overlap => Rejection::Overlap,
            PlacementError::UnknownShip(_) | PlacementError::Conflict(_) => Rejection::Internal,
        }
    }
}

impl From<FleetError> for Rejection {
    fn from(e: FleetError) -> Self {
        match e {
            FleetError::WrongShipSet => Rejection::WrongShipSet,
            FleetError::Ship { error, .. } => error.into(),
        }
    }
}

impl From<AttackError> for Rejection {
    fn from(e: AttackError) -> Self {
        match e {
            AttackError::DuplicateAttack => Rejection::DuplicateAttack,
            AttackError::UnknownShip(_) => Rejection::Internal,
        }
    }
}
