//! Player session continuity for the Tombola server.
//!
//! A connection is ephemeral — browsers refresh, phones drop WiFi. The
//! session layer keeps the durable record: who a player is, what cards
//! they hold, and which live connection (if any) currently speaks for
//! them.
//!
//! 1. **Registration** — a successful join creates (or overwrites) the
//!    record for a session key.
//! 2. **Rebinding** — a reconnect swaps the connection handle on the
//!    existing record; nothing else changes.
//! 3. **Release** — a disconnect drops only the live-connection index.
//!    The durable record survives until an explicit game reset.
//!
//! There is no expiry: a session lives as long as the game itself, and
//! a process restart is equivalent to a reset.

mod player;
mod registry;

pub use player::Player;
pub use registry::{generate_session_key, SessionRegistry};
