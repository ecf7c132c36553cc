//! The session registry: durable records plus the live-connection index.
//!
//! Two maps, kept in sync: the authoritative `players` map keyed by
//! session key, and `by_connection` resolving a live socket back to its
//! session. All mutation goes through the registry so the two can never
//! drift apart.
//!
//! # Concurrency note
//!
//! The registry is not thread-safe by itself — it is owned by the game
//! state, which the engine mutates from a single task. No interior
//! locking here.

use std::collections::HashMap;

use rand::Rng;

use tombola_protocol::{PlayerSummary, SessionKey};
use tombola_transport::ConnectionId;

use crate::Player;

/// All durable player records for the running game.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    /// Authoritative records, keyed by session key.
    players: HashMap<SessionKey, Player>,

    /// Live connections back to their session keys. A player with no
    /// entry here is disconnected but not forgotten.
    by_connection: HashMap<ConnectionId, SessionKey>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a freshly joined player, overwriting any previous record
    /// under the same session key (a re-join replaces the old identity).
    pub fn register(&mut self, player: Player) {
        if let Some(previous) = self.players.get(player.session_key()) {
            if let Some(stale) = previous.connection {
                self.by_connection.remove(&stale);
            }
        }
        if let Some(conn) = player.connection {
            self.by_connection.insert(conn, player.session_key().clone());
        }
        tracing::info!(
            session = %player.session_key(),
            nickname = player.nickname(),
            cards = player.card_ids().len(),
            "player registered"
        );
        self.players.insert(player.session_key().clone(), player);
    }

    /// Rebinds an existing session to a new connection and returns the
    /// restored record.
    ///
    /// Idempotent: replaying the same reconnect produces the same
    /// outcome whether or not the previous connection is still indexed.
    /// Returns `None` for an unknown key — the caller then proceeds
    /// with an ordinary join.
    pub fn rebind(&mut self, key: &SessionKey, conn: ConnectionId) -> Option<&Player> {
        let player = self.players.get_mut(key)?;
        if let Some(stale) = player.connection.replace(conn) {
            self.by_connection.remove(&stale);
        }
        self.by_connection.insert(conn, key.clone());
        tracing::info!(session = %key, %conn, "session rebound");
        Some(&*player)
    }

    /// Unbinds a dropped connection, keeping the durable record.
    ///
    /// Returns the detached player so the caller can free their cards
    /// if the game has not started. `None` if the connection never
    /// belonged to a joined player.
    pub fn release(&mut self, conn: ConnectionId) -> Option<&Player> {
        let key = self.by_connection.remove(&conn)?;
        let player = self.players.get_mut(&key)?;
        player.connection = None;
        tracing::info!(session = %key, %conn, "connection released");
        Some(&*player)
    }

    /// The player currently speaking through `conn`, if any.
    pub fn by_connection(&self, conn: ConnectionId) -> Option<&Player> {
        let key = self.by_connection.get(&conn)?;
        self.players.get(key)
    }

    /// The record for a session key, connected or not.
    pub fn get(&self, key: &SessionKey) -> Option<&Player> {
        self.players.get(key)
    }

    /// All durable records, in no particular order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    /// Mutable access to all records (used when dealing cards at start).
    pub fn players_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.values_mut()
    }

    /// Lobby-table rows for every connected player.
    pub fn connected_summaries(&self) -> Vec<PlayerSummary> {
        self.players
            .values()
            .filter(|p| p.connection.is_some())
            .map(Player::summary)
            .collect()
    }

    /// Total cards held by connected players — the basis of the prize
    /// pot.
    pub fn cards_sold(&self) -> usize {
        self.players
            .values()
            .filter(|p| p.connection.is_some())
            .map(|p| p.card_ids().len())
            .sum()
    }

    /// Number of connected players.
    pub fn connected_count(&self) -> usize {
        self.by_connection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

/// Generates a random session key for clients that joined without one:
/// 32 hex characters, 128 bits of entropy.
pub fn generate_session_key() -> SessionKey {
    let mut rng = rand::rng();
    let bytes: [u8; 16] = rng.random();
    SessionKey(bytes.iter().map(|b| format!("{b:02x}")).collect())
}

// =========================================================================
// Tests
// =========================================================================
