//! The arena task: owns the world, drives the tick loop, delivers messages

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, info};
use uuid::Uuid;

use crate::game::world::ArenaWorld;
use crate::game::{Outbound, Recipient};
use crate::util::time::{unix_millis, TICK_DURATION_MICROS};
use crate::ws::protocol::{ClientMsg, ServerMsg};

/// Commands flowing from connection tasks into the arena task
#[derive(Debug)]
pub enum GameCommand {
    /// A session connected; `tx` delivers its outbound messages
    Connect {
        session_id: Uuid,
        tx: mpsc::UnboundedSender<ServerMsg>,
    },
    /// A parsed client message from a session
    Message { session_id: Uuid, msg: ClientMsg },
    /// A session's socket closed
    Disconnect { session_id: Uuid },
}

/// Handle for talking to the running arena
#[derive(Clone)]
pub struct ArenaHandle {
    pub commands: mpsc::Sender<GameCommand>,
    /// Occupancy mirrors for the health endpoint; updated by the arena task
    pub player_count: Arc<AtomicUsize>,
    pub spectator_count: Arc<AtomicUsize>,
    pub bullet_count: Arc<AtomicUsize>,
}

impl ArenaHandle {
    pub fn player_count(&self) -> usize {
        self.player_count.load(Ordering::Relaxed)
    }

    pub fn spectator_count(&self) -> usize {
        self.spectator_count.load(Ordering::Relaxed)
    }

    pub fn bullet_count(&self) -> usize {
        self.bullet_count.load(Ordering::Relaxed)
    }
}

/// The authoritative arena server task
pub struct ArenaServer {
    world: ArenaWorld,
    commands: mpsc::Receiver<GameCommand>,
    /// Per-session outbound channels; broadcast iterates these
    connections: HashMap<Uuid, mpsc::UnboundedSender<ServerMsg>>,
    player_count: Arc<AtomicUsize>,
    spectator_count: Arc<AtomicUsize>,
    bullet_count: Arc<AtomicUsize>,
}

impl ArenaServer {
    pub fn new() -> (Self, ArenaHandle) {
        let (command_tx, command_rx) = mpsc::channel(256);
        let player_count = Arc::new(AtomicUsize::new(0));
        let spectator_count = Arc::new(AtomicUsize::new(0));
        let bullet_count = Arc::new(AtomicUsize::new(0));

        let handle = ArenaHandle {
            commands: command_tx,
            player_count: player_count.clone(),
            spectator_count: spectator_count.clone(),
            bullet_count: bullet_count.clone(),
        };

        let server = Self {
            world: ArenaWorld::new(),
            commands: command_rx,
            connections: HashMap::new(),
            player_count,
            spectator_count,
            bullet_count,
        };

        (server, handle)
    }

    /// Run the fixed-rate tick loop. Input commands drain between ticks;
    /// each one applies synchronously to current state, so a move and a
    /// tick may interleave in either order within the same millisecond.
    pub async fn run(mut self) {
        info!(tps = crate::util::time::SIMULATION_TPS, "Arena started");

        let tick_duration = Duration::from_micros(TICK_DURATION_MICROS);
        let mut tick_interval = interval(tick_duration);
        tick_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tick_interval.tick().await;

            self.drain_commands();

            let outbound = self.world.tick(unix_millis());
            self.deliver(outbound);

            self.update_counters();
        }
    }

    /// Apply all pending commands from connection tasks
    fn drain_commands(&mut self) {
        while let Ok(cmd) = self.commands.try_recv() {
            let outbound = match cmd {
                GameCommand::Connect { session_id, tx } => {
                    self.connections.insert(session_id, tx);
                    self.world.handle_connect(session_id)
                }
                GameCommand::Message { session_id, msg } => {
                    let now = unix_millis();
                    match msg {
                        ClientMsg::PlayerMove { dx, dy, angle } => {
                            self.world.handle_move(session_id, dx, dy, angle, now)
                        }
                        ClientMsg::PlayerShoot { angle } => {
                            self.world.handle_shoot(session_id, angle, now)
                        }
                    }
                }
                GameCommand::Disconnect { session_id } => {
                    self.connections.remove(&session_id);
                    self.world.handle_disconnect(session_id)
                }
            };
            self.deliver(outbound);
        }
    }

    /// Fire-and-forget delivery. A send to a closed channel means the
    /// session is going away; its Disconnect command does the cleanup.
    fn deliver(&self, outbound: Vec<Outbound>) {
        for Outbound { to, msg } in outbound {
            match to {
                Recipient::All => {
                    for tx in self.connections.values() {
                        let _ = tx.send(msg.clone());
                    }
                }
                Recipient::One(session_id) => {
                    if let Some(tx) = self.connections.get(&session_id) {
                        let _ = tx.send(msg);
                    } else {
                        debug!(session_id = %session_id, "Dropping message for departed session");
                    }
                }
            }
        }
    }

    fn update_counters(&self) {
        self.player_count
            .store(self.world.player_count(), Ordering::Relaxed);
        self.spectator_count
            .store(self.world.spectator_count(), Ordering::Relaxed);
        self.bullet_count
            .store(self.world.bullet_count(), Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connect_command_delivers_targeted_state() {
        let (mut server, handle) = ArenaServer::new();
        let session_id = Uuid::new_v4();
        let (tx, mut rx) = mpsc::unbounded_channel();

        handle
            .commands
            .send(GameCommand::Connect { session_id, tx })
            .await
            .unwrap();
        server.drain_commands();
        server.update_counters();

        match rx.try_recv().unwrap() {
            ServerMsg::GameState { is_spectator, .. } => assert!(!is_spectator),
            other => panic!("expected gameState, got {:?}", other),
        }
        assert!(matches!(
            rx.try_recv().unwrap(),
            ServerMsg::PlayerJoined { player_count: 1 }
        ));
        assert_eq!(handle.player_count(), 1);
    }

    #[tokio::test]
    async fn disconnect_stops_delivery() {
        let (mut server, handle) = ArenaServer::new();
        let session_id = Uuid::new_v4();
        let (tx, mut rx) = mpsc::unbounded_channel();

        handle
            .commands
            .send(GameCommand::Connect { session_id, tx })
            .await
            .unwrap();
        handle
            .commands
            .send(GameCommand::Disconnect { session_id })
            .await
            .unwrap();
        server.drain_commands();

        // Drain whatever arrived before the disconnect
        while rx.try_recv().is_ok() {}

        let outbound = server.world.tick(unix_millis());
        server.deliver(outbound);
        assert!(rx.try_recv().is_err());
    }
}
