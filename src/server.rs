//! Server-authoritative match server.
//!
//! One reader task and one writer task per connection; all game state
//! lives behind the matchmaker and per-room locks. Lock nesting order is
//! matchmaker, then room, then the client channel table; deliveries run
//! under the lock that produced them so both clients observe room events
//! in commit order.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use crate::connection::tcp::TcpConnection;
use crate::connection::{MessageSink, MessageSource};
use crate::grid::GridSpec;
use crate::matchmaker::Matchmaker;
use crate::protocol::{ClientId, ClientMessage, Rejection, ServerMessage};
use crate::session::{Outgoing, Phase};

pub struct Server {
    matchmaker: Mutex<Matchmaker>,
    clients: Mutex<HashMap<ClientId, mpsc::UnboundedSender<ServerMessage>>>,
    next_client: AtomicU64,
}

impl Server {
    /// A fixed `seed` makes matchmaking coin flips reproducible.
    pub fn new(spec: GridSpec, seed: Option<u64>) -> Arc<Self> {
        let rng = match seed {
            Some(s) => SmallRng::seed_from_u64(s),
            None => SmallRng::from_rng(&mut rand::rng()),
        };
        Arc::new(Self {
            matchmaker: Mutex::new(Matchmaker::new(spec, rng)),
            clients: Mutex::new(HashMap::new()),
            next_client: AtomicU64::new(1),
        })
    }

    /// Accept loop: one connection per client, served until it drops.
    pub async fn run(self: Arc<Self>, listener: TcpListener) -> anyhow::Result<()> {
        log::info!("listening on {}", listener.local_addr()?);
        loop {
            let (stream, addr) = listener.accept().await?;
            log::info!("connection from {}", addr);
            let server = Arc::clone(&self);
            tokio::spawn(async move {
                let (sink, source) = TcpConnection::new(stream).split();
                if let Err(e) = server.serve_connection(sink, source).await {
                    log::warn!("connection from {} ended with error: {}", addr, e);
                }
            });
        }
    }

    /// Serve one client over any connection. Assigns the client id, runs
    /// the writer task and dispatches inbound messages until the source
    /// fails, then tears the client's room down.
    pub async fn serve_connection<S, R>(
        self: Arc<Self>,
        mut sink: S,
        mut source: R,
    ) -> anyhow::Result<()>
    where
        S: MessageSink<ServerMessage> + 'static,
        R: MessageSource<ClientMessage>,
    {
        let client_id = self.next_client.fetch_add(1, Ordering::SeqCst);
        let (tx, mut rx) = mpsc::unbounded_channel();
        self.clients.lock().unwrap().insert(client_id, tx.clone());
        let _ = tx.send(ServerMessage::ConnectionConfirmed { client_id });

        let writer = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                if sink.send(msg).await.is_err() {
                    break;
                }
            }
        });

        let reason = loop {
            match source.recv().await {
                Ok(msg) => self.dispatch(client_id, msg),
                Err(e) => break e,
            }
        };
        log::info!("client {} disconnected: {}", client_id, reason);
        self.disconnect(client_id);
        drop(tx);
        let _ = writer.await;
        Ok(())
    }

    fn dispatch(&self, client: ClientId, msg: ClientMessage) {
        match msg {
            ClientMessage::JoinGame => {
                let mut mm = self.matchmaker.lock().unwrap();
                match mm.join(client) {
                    Ok((_, events)) => self.deliver(&events),
                    Err(e) => self.reject(client, e.into()),
                }
            }
            other => self.dispatch_room(client, other),
        }
    }

    fn dispatch_room(&self, client: ClientId, msg: ClientMessage) {
        let room = self.matchmaker.lock().unwrap().room_for(client);
        let room = match room {
            Ok(room) => room,
            Err(e) => return self.reject(client, e.into()),
        };
        let finished = {
            let mut room = room.lock().unwrap();
            let result = match msg {
                ClientMessage::SceneLoaded => room.scene_loaded(client),
                ClientMessage::ShipsPlaced(placement) => {
                    room.submit_placement(client, &placement)
                }
                ClientMessage::Attack { x, z } => room.attack(client, x, z),
                ClientMessage::JoinGame => unreachable!("join is handled before room lookup"),
            };
            match result {
                Ok(events) => self.deliver(&events),
                Err(e) => self.reject(client, e.into()),
            }
            (room.phase() == Phase::Finished).then(|| room.id())
        };
        if let Some(id) = finished {
            self.matchmaker.lock().unwrap().remove_room(id);
        }
    }

    fn deliver(&self, events: &[Outgoing]) {
        let clients = self.clients.lock().unwrap();
        for event in events {
            match clients.get(&event.to) {
                Some(tx) => {
                    // A send error means the client is mid-teardown; its
                    // disconnect path handles the room.
                    let _ = tx.send(event.msg.clone());
                }
                None => log::debug!("dropping message for departed client {}", event.to),
            }
        }
    }

    fn reject(&self, client: ClientId, rejection: Rejection) {
        log::debug!("client {} rejected: {}", client, rejection);
        self.deliver(&[Outgoing {
            to: client,
            msg: ServerMessage::Rejected(rejection),
        }]);
    }

    fn disconnect(&self, client: ClientId) {
        let events = {
            let mut mm = self.matchmaker.lock().unwrap();
            mm.remove_client(client)
        };
        self.deliver(&events);
        self.clients.lock().unwrap().remove(&client);
    }

    /// Number of live rooms, for diagnostics and tests.
    pub fn room_count(&self) -> usize {
        self.matchmaker.lock().unwrap().room_count()
    }
}
