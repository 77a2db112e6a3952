//! Scripted client used by the local demo and the end-to-end tests: joins
//! matchmaking, submits a fixed layout and attacks every cell in scan
//! order until the match ends.

use crate::connection::{MessageSink, MessageSource};
use crate::grid::{Cell, GridSpec};
use crate::placement::ShipPose;
use crate::protocol::{ClientId, ClientMessage, FleetPlacement, ServerMessage};
use crate::ship::{Rotation, ShipClass};

/// How one scripted match ended for this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchReport {
    pub client_id: ClientId,
    pub won: bool,
    pub attacks: usize,
}

/// One ship per column, all unrotated, anchored on the first row.
pub fn default_layout() -> FleetPlacement {
    let ships = ShipClass::ALL
        .iter()
        .enumerate()
        .map(|(i, &class)| ShipPose {
            class,
            anchor: Cell::new(i as i32, 0),
            rotation: Rotation::R0,
        })
        .collect();
    FleetPlacement { ships }
}

/// Drive one client through a full match and report the outcome.
pub async fn run_scripted<S, R>(
    mut sink: S,
    mut source: R,
    spec: GridSpec,
) -> anyhow::Result<MatchReport>
where
    S: MessageSink<ClientMessage>,
    R: MessageSource<ServerMessage>,
{
    let client_id = match source.recv().await? {
        ServerMessage::ConnectionConfirmed { client_id } => client_id,
        other => anyhow::bail!("expected ConnectionConfirmed, got {:?}", other),
    };
    sink.send(ClientMessage::JoinGame).await?;

    let n = spec.divisions();
    let mut next_target = 0u32;
    let mut attacks = 0usize;
    loop {
        match source.recv().await? {
            ServerMessage::GameStart { .. } => {
                sink.send(ClientMessage::SceneLoaded).await?;
                sink.send(ClientMessage::ShipsPlaced(default_layout())).await?;
            }
            ServerMessage::PlayerTurn(id) if id == client_id => {
                if next_target >= n * n {
                    anyhow::bail!("ran out of cells to attack");
                }
                let cell = Cell::new((next_target % n) as i32, (next_target / n) as i32);
                next_target += 1;
                attacks += 1;
                let (x, z) = spec.cell_center(cell);
                sink.send(ClientMessage::Attack { x, z }).await?;
            }
            ServerMessage::AttackResult {
                attacker,
                game_over: true,
                ..
            } => {
                return Ok(MatchReport {
                    client_id,
                    won: attacker == client_id,
                    attacks,
                });
            }
            ServerMessage::PlayerDisconnected(id) => {
                anyhow::bail!("opponent {} disconnected", id)
            }
            ServerMessage::Rejected(r) => anyhow::bail!("action rejected: {}", r),
            ServerMessage::WaitingForOpponent
            | ServerMessage::OpponentSceneReady
            | ServerMessage::AllShipsPlaced
            | ServerMessage::PlayerTurn(_)
            | ServerMessage::AttackResult { .. } => {}
            ServerMessage::ConnectionConfirmed { .. } => {
                anyhow::bail!("unexpected second ConnectionConfirmed")
            }
        }
    }
}
