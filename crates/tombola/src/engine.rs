//! The game engine actor: one task owning the coordinator.
//!
//! Connection handlers never touch game state directly — they enqueue
//! commands on the engine's channel and the actor processes them one at
//! a time. That single consumer is the whole concurrency story: the
//! check-and-reserve step of a join, the draw sequence, and the winner
//! board all mutate inside one task with no preemption mid-handler.
//!
//! Outbound delivery is fire-and-forget: the actor resolves each
//! `(Recipient, ServerEvent)` pair against its sender table and pushes
//! into per-connection unbounded channels. A handler never blocks
//! waiting on a slow reader.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc;

use tombola_deck::Deck;
use tombola_game::GameCoordinator;
use tombola_protocol::{ClientEvent, Recipient, ServerEvent};
use tombola_transport::ConnectionId;

/// Default command channel size for the engine actor.
const DEFAULT_CHANNEL_SIZE: usize = 64;

/// Channel sender delivering outbound events to one connection's writer
/// task.
pub type EventSender = mpsc::UnboundedSender<ServerEvent>;

/// Commands sent to the engine actor through its channel.
enum EngineCommand {
    /// Register a connection's outbound channel.
    Attach {
        conn: ConnectionId,
        sender: EventSender,
    },
    /// Deliver a decoded client event.
    Event {
        conn: ConnectionId,
        event: ClientEvent,
    },
    /// A connection is gone: drop its channel and run disconnect
    /// handling.
    Detach { conn: ConnectionId },
}

/// Handle to the running engine. Cheap to clone — one per connection
/// task.
#[derive(Clone)]
pub struct GameHandle {
    sender: mpsc::Sender<EngineCommand>,
}

impl GameHandle {
    /// Registers a connection's outbound channel with the engine.
    pub async fn attach(&self, conn: ConnectionId, sender: EventSender) {
        let _ = self.sender.send(EngineCommand::Attach { conn, sender }).await;
    }

    /// Enqueues one client event for processing.
    pub async fn event(&self, conn: ConnectionId, event: ClientEvent) {
        let _ = self.sender.send(EngineCommand::Event { conn, event }).await;
    }

    /// Reports a closed connection.
    pub async fn detach(&self, conn: ConnectionId) {
        let _ = self.sender.send(EngineCommand::Detach { conn }).await;
    }
}

/// The actor state: the coordinator plus the live sender table.
struct GameEngine {
    coordinator: GameCoordinator,
    senders: HashMap<ConnectionId, EventSender>,
    receiver: mpsc::Receiver<EngineCommand>,
}

impl GameEngine {
    async fn run(mut self) {
        tracing::info!("game engine started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                EngineCommand::Attach { conn, sender } => {
                    self.senders.insert(conn, sender);
                }
                EngineCommand::Event { conn, event } => {
                    let out = self.coordinator.handle(conn, event);
                    self.dispatch(out);
                }
                EngineCommand::Detach { conn } => {
                    self.senders.remove(&conn);
                    let out = self.coordinator.handle_disconnect(conn);
                    self.dispatch(out);
                }
            }
        }

        tracing::info!("game engine stopped");
    }

    /// Resolves recipients against the sender table and delivers.
    fn dispatch(&self, out: Vec<(Recipient, ServerEvent)>) {
        for (recipient, event) in out {
            match recipient {
                Recipient::All => {
                    for sender in self.senders.values() {
                        let _ = sender.send(event.clone());
                    }
                }
                Recipient::Admin => {
                    // Resolved at delivery time: no admin, no delivery.
                    if let Some(admin) = self.coordinator.state().admin {
                        self.send_to(admin, event);
                    }
                }
                Recipient::Conn(conn) => self.send_to(conn, event),
            }
        }
    }

    /// Sends to a single connection. Silently drops if its channel is
    /// gone (the connection just closed).
    fn send_to(&self, conn: ConnectionId, event: ServerEvent) {
        if let Some(sender) = self.senders.get(&conn) {
            let _ = sender.send(event);
        }
    }
}

/// Spawns the engine task over a validated deck and returns its handle.
pub(crate) fn spawn_engine(deck: Arc<Deck>) -> GameHandle {
    let (tx, rx) = mpsc::channel(DEFAULT_CHANNEL_SIZE);

    let engine = GameEngine {
        coordinator: GameCoordinator::new(deck),
        senders: HashMap::new(),
        receiver: rx,
    };

    tokio::spawn(engine.run());

    GameHandle { sender: tx }
}

// =========================================================================
// Tests
// =========================================================================
