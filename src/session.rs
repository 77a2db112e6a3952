//! Per-room session state machine.
//!
//! A [`Room`] owns all per-match state: both seats' fleets, occupancy maps
//! and attacked-cell histories, the current phase and whose turn it is.
//! Every operation returns the messages to deliver, in commit order; the
//! caller serialises access (one room, one lock) so at most one placement
//! or attack mutates a room at a time.

use std::collections::HashSet;

use rand::rngs::SmallRng;
use rand::Rng;

use crate::attack::{resolve_attack, AttackError};
use crate::grid::{Cell, GridSpec};
use crate::occupancy::OccupancyMap;
use crate::placement::{assemble_fleet, FleetError};
use crate::protocol::{ClientId, FleetPlacement, Rejection, RoomId, ServerMessage};
use crate::ship::Fleet;

/// Lifecycle of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    WaitingForOpponent,
    Placing,
    InProgress,
    Finished,
}

/// A message addressed to one client, produced by a room operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Outgoing {
    pub to: ClientId,
    pub msg: ServerMessage,
}

impl Outgoing {
    fn new(to: ClientId, msg: ServerMessage) -> Self {
        Self { to, msg }
    }
}

/// Why a session operation was refused. Refused operations change no
/// room state and are reported to the originating client only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// The action is not valid in the room's current phase.
    WrongPhase,
    /// An attack arrived from the player whose turn it is not.
    NotYourTurn,
    /// The room has no second player yet.
    NoOpponent,
    /// The client is not seated in this room.
    NotInRoom,
    Fleet(FleetError),
    Attack(AttackError),
}

impl core::fmt::Display for SessionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SessionError::WrongPhase => write!(f, "action not valid in the current phase"),
            SessionError::NotYourTurn => write!(f, "not your turn"),
            SessionError::NoOpponent => write!(f, "no opponent in the room"),
            SessionError::NotInRoom => write!(f, "not in an active room"),
            SessionError::Fleet(e) => write!(f, "placement rejected: {}", e),
            SessionError::Attack(e) => write!(f, "attack rejected: {}", e),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<FleetError> for SessionError {
    fn from(e: FleetError) -> Self {
        SessionError::Fleet(e)
    }
}

impl From<AttackError> for SessionError {
    fn from(e: AttackError) -> Self {
        SessionError::Attack(e)
    }
}

impl From<SessionError> for Rejection {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::WrongPhase => Rejection::WrongPhase,
            SessionError::NotYourTurn => Rejection::NotYourTurn,
            SessionError::NoOpponent => Rejection::NoOpponent,
            SessionError::NotInRoom => Rejection::NotInRoom,
            SessionError::Fleet(e) => e.into(),
            SessionError::Attack(e) => e.into(),
        }
    }
}

/// One player's side of the match.
#[derive(Debug)]
struct Seat {
    client: ClientId,
    fleet: Fleet,
    occupancy: OccupancyMap,
    /// Cells attacked against this defender, hit or miss.
    attacked: HashSet<Cell>,
    placed: bool,
}

impl Seat {
    fn new(client: ClientId) -> Self {
        Self {
            client,
            fleet: Fleet::new(),
            occupancy: OccupancyMap::new(),
            attacked: HashSet::new(),
            placed: false,
        }
    }
}

/// The paired-player context for one match.
#[derive(Debug)]
pub struct Room {
    id: RoomId,
    spec: GridSpec,
    phase: Phase,
    seats: Vec<Seat>,
    turn: Option<ClientId>,
    rng: SmallRng,
}

impl Room {
    /// Create a room holding its first player, announcing the wait for an
    /// opponent.
    pub fn new(id: RoomId, spec: GridSpec, first: ClientId, rng: SmallRng) -> (Self, Vec<Outgoing>) {
        let room = Self {
            id,
            spec,
            phase: Phase::WaitingForOpponent,
            seats: vec![Seat::new(first)],
            turn: None,
            rng,
        };
        let events = vec![Outgoing::new(first, ServerMessage::WaitingForOpponent)];
        (room, events)
    }

    pub fn id(&self) -> RoomId {
        self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn turn(&self) -> Option<ClientId> {
        self.turn
    }

    pub fn members(&self) -> Vec<ClientId> {
        self.seats.iter().map(|s| s.client).collect()
    }

    pub fn has_open_seat(&self) -> bool {
        self.phase == Phase::WaitingForOpponent && self.seats.len() < 2
    }

    fn seat_index(&self, client: ClientId) -> Option<usize> {
        self.seats.iter().position(|s| s.client == client)
    }

    fn opponent_index(&self, client: ClientId) -> Option<usize> {
        self.seats.iter().position(|s| s.client != client)
    }

    fn broadcast(&self, msg: ServerMessage) -> Vec<Outgoing> {
        self.seats
            .iter()
            .map(|s| Outgoing::new(s.client, msg.clone()))
            .collect()
    }

    /// Seat the second player and open the placement phase.
    pub fn join(&mut self, second: ClientId) -> Result<Vec<Outgoing>, SessionError> {
        if !self.has_open_seat() {
            return Err(SessionError::WrongPhase);
        }
        self.seats.push(Seat::new(second));
        self.phase = Phase::Placing;
        let start = ServerMessage::GameStart {
            player1: self.seats[0].client,
            player2: self.seats[1].client,
            room_id: self.id,
        };
        Ok(self.broadcast(start))
    }

    /// Relay a readiness signal to the opponent only.
    pub fn scene_loaded(&mut self, client: ClientId) -> Result<Vec<Outgoing>, SessionError> {
        self.seat_index(client).ok_or(SessionError::NotInRoom)?;
        let opponent = self
            .opponent_index(client)
            .ok_or(SessionError::NoOpponent)?;
        Ok(vec![Outgoing::new(
            self.seats[opponent].client,
            ServerMessage::OpponentSceneReady,
        )])
    }

    /// Validate and store a player's final fleet placement. When both
    /// players have placed, the match starts and a first-turn player is
    /// chosen uniformly at random between the two members.
    pub fn submit_placement(
        &mut self,
        client: ClientId,
        placement: &FleetPlacement,
    ) -> Result<Vec<Outgoing>, SessionError> {
        if self.phase != Phase::Placing {
            return Err(SessionError::WrongPhase);
        }
        let idx = self.seat_index(client).ok_or(SessionError::NotInRoom)?;
        let (fleet, occupancy) = assemble_fleet(&self.spec, &placement.ships)?;
        let seat = &mut self.seats[idx];
        seat.fleet = fleet;
        seat.occupancy = occupancy;
        seat.placed = true;

        if !self.seats.iter().all(|s| s.placed) {
            return Ok(Vec::new());
        }
        self.phase = Phase::InProgress;
        let first = self.seats[self.rng.random_range(0..self.seats.len())].client;
        self.turn = Some(first);
        log::info!("room {}: all ships placed, first turn {}", self.id, first);
        let mut events = self.broadcast(ServerMessage::AllShipsPlaced);
        events.extend(self.broadcast(ServerMessage::PlayerTurn(first)));
        Ok(events)
    }

    /// Resolve an attack from `client` at world position `(x, z)`.
    ///
    /// The position is quantized onto the defender's grid, resolved
    /// against the defender's fleet and occupancy map, and the result is
    /// broadcast to both players. The turn flips unless the attack ended
    /// the game.
    pub fn attack(
        &mut self,
        client: ClientId,
        x: f32,
        z: f32,
    ) -> Result<Vec<Outgoing>, SessionError> {
        if self.phase != Phase::InProgress {
            return Err(SessionError::WrongPhase);
        }
        self.seat_index(client).ok_or(SessionError::NotInRoom)?;
        if self.turn != Some(client) {
            return Err(SessionError::NotYourTurn);
        }
        let defender_idx = self
            .opponent_index(client)
            .ok_or(SessionError::NoOpponent)?;
        let cell = self.spec.quantize(x, z);
        let defender = &mut self.seats[defender_idx];
        let outcome = resolve_attack(
            cell,
            &mut defender.fleet,
            &defender.occupancy,
            &mut defender.attacked,
        )?;
        let defender_id = defender.client;
        log::debug!(
            "room {}: {} attacked {} -> hit={} sunk={} game_over={}",
            self.id,
            client,
            cell,
            outcome.hit,
            outcome.sunk,
            outcome.game_over
        );

        let mut events = self.broadcast(ServerMessage::AttackResult {
            attacker: client,
            cell,
            hit: outcome.hit,
            sunk: outcome.sunk,
            game_over: outcome.game_over,
        });
        if outcome.game_over {
            self.finish();
        } else {
            self.turn = Some(defender_id);
            events.extend(self.broadcast(ServerMessage::PlayerTurn(defender_id)));
        }
        Ok(events)
    }

    /// Terminal teardown on disconnect, from any phase. The remaining
    /// player is notified; the room is then destroyed by the registry.
    pub fn disconnect(&mut self, client: ClientId) -> Vec<Outgoing> {
        let events = self
            .seats
            .iter()
            .filter(|s| s.client != client)
            .map(|s| Outgoing::new(s.client, ServerMessage::PlayerDisconnected(client)))
            .collect();
        self.finish();
        events
    }

    fn finish(&mut self) {
        self.phase = Phase::Finished;
        self.turn = None;
        for seat in &mut self.seats {
            seat.occupancy.clear();
        }
    }
}
