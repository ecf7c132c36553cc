//! The single shared game state.

use tombola_protocol::WinnerBoard;
use tombola_session::SessionRegistry;
use tombola_transport::ConnectionId;

use crate::{AvailabilityTracker, DrawSequencer, PrizePool};

/// Everything one running game knows. Owned by the coordinator; one
/// instance per process.
///
/// Invariants the coordinator maintains:
/// - `assigned` is the union of the connected players' card-id sets
///   (a pre-start disconnect frees the ids while the durable session
///   record keeps them).
/// - once `started`, the assigned set and player card sets are frozen.
/// - `winners` holds each category at most once until an explicit admin
///   rejection or a reset clears it.
///
/// A reset replaces the whole value with [`GameState::new`] — never a
/// field-by-field clear that can miss something.
#[derive(Debug, Default)]
pub struct GameState {
    /// The registered admin connection, at most one.
    pub admin: Option<ConnectionId>,
    /// Durable player records and the live-connection index.
    pub registry: SessionRegistry,
    /// Which card ids are currently claimed.
    pub assigned: AvailabilityTracker,
    /// The drawn-number sequence.
    pub draws: DrawSequencer,
    /// `false` in the lobby, `true` once cards are dealt.
    pub started: bool,
    /// Cost of a single card, set by the admin.
    pub cost_per_card: f64,
    /// Prize amounts per category.
    pub prizes: PrizePool,
    /// Claimed categories, by nickname.
    pub winners: WinnerBoard,
}

impl GameState {
    /// A fresh lobby: no admin, no players, everything available.
    pub fn new() -> Self {
        Self::default()
    }
}
