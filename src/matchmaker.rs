//! Matchmaking registry: pairs connecting clients into rooms of two.
//!
//! The registry table is shared across all connections and is mutated
//! under a single lock; each room carries its own lock so matches never
//! block one another once created.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::grid::GridSpec;
use crate::protocol::{ClientId, Rejection, RoomId};
use crate::session::{Outgoing, Room};

/// Registry-level refusals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchmakerError {
    /// The client already sits in an active room.
    AlreadyInRoom,
    /// The client belongs to no active room.
    NotInRoom,
}

impl core::fmt::Display for MatchmakerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MatchmakerError::AlreadyInRoom => write!(f, "client is already in a room"),
            MatchmakerError::NotInRoom => write!(f, "client is not in an active room"),
        }
    }
}

impl std::error::Error for MatchmakerError {}

impl From<MatchmakerError> for Rejection {
    fn from(e: MatchmakerError) -> Self {
        match e {
            MatchmakerError::AlreadyInRoom => Rejection::AlreadyInRoom,
            MatchmakerError::NotInRoom => Rejection::NotInRoom,
        }
    }
}

/// Shared room table. Room ids are monotonically increasing per server.
pub struct Matchmaker {
    spec: GridSpec,
    rooms: HashMap<RoomId, Arc<Mutex<Room>>>,
    by_client: HashMap<ClientId, RoomId>,
    next_room: RoomId,
    rng: SmallRng,
}

impl Matchmaker {
    /// `rng` seeds each room's first-turn coin flip.
    pub fn new(spec: GridSpec, rng: SmallRng) -> Self {
        Self {
            spec,
            rooms: HashMap::new(),
            by_client: HashMap::new(),
            next_room: 0,
            rng,
        }
    }

    /// Seat a client: the first room with an open seat wins, otherwise a
    /// new room is created in the waiting state. Returns the room id and
    /// the messages the join produced.
    pub fn join(
        &mut self,
        client: ClientId,
    ) -> Result<(RoomId, Vec<Outgoing>), MatchmakerError> {
        if self.by_client.contains_key(&client) {
            return Err(MatchmakerError::AlreadyInRoom);
        }
        for (&id, room) in &self.rooms {
            let mut room = room.lock().unwrap();
            if room.has_open_seat() {
                // has_open_seat guarantees join succeeds; both run under
                // the same room lock.
                let events = room
                    .join(client)
                    .expect("open seat vanished under the room lock");
                self.by_client.insert(client, id);
                log::info!("client {} joined room {}", client, id);
                return Ok((id, events));
            }
        }
        let id = self.next_room;
        self.next_room += 1;
        let room_rng = SmallRng::from_rng(&mut self.rng);
        let (room, events) = Room::new(id, self.spec, client, room_rng);
        self.rooms.insert(id, Arc::new(Mutex::new(room)));
        self.by_client.insert(client, id);
        log::info!("client {} opened room {}", client, id);
        Ok((id, events))
    }

    /// The room a client is seated in, for all post-join operations.
    pub fn room_for(&self, client: ClientId) -> Result<Arc<Mutex<Room>>, MatchmakerError> {
        let id = self
            .by_client
            .get(&client)
            .ok_or(MatchmakerError::NotInRoom)?;
        Ok(Arc::clone(&self.rooms[id]))
    }

    /// Destroy a room and unregister its members.
    pub fn remove_room(&mut self, id: RoomId) {
        if let Some(room) = self.rooms.remove(&id) {
            let members = room.lock().unwrap().members();
            for member in members {
                self.by_client.remove(&member);
            }
            log::info!("room {} removed", id);
        }
    }

    /// Handle a client vanishing: tears its room down from any phase and
    /// returns the notifications for the remaining player.
    pub fn remove_client(&mut self, client: ClientId) -> Vec<Outgoing> {
        let Some(&id) = self.by_client.get(&client) else {
            return Vec::new();
        };
        let events = match self.rooms.get(&id) {
            Some(room) => room.lock().unwrap().disconnect(client),
            None => Vec::new(),
        };
        self.remove_room(id);
        events
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}
