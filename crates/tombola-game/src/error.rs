//! Error types for game operations.
//!
//! All of these are recoverable: they surface once as a reply to the
//! originating connection and change no state. Unauthorized admin
//! actions are deliberately absent — those are silent no-ops, not
//! errors, and callers must not expect a response.

use tombola_protocol::WinCategory;

/// A rejected game operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The requested card ids cannot all be reserved: at least one is
    /// taken, repeated within the request, or outside the deck.
    #[error("some of the selected cards are no longer available")]
    CardsUnavailable,

    /// The game has already started; card assignment is frozen.
    #[error("the game has already started")]
    AlreadyStarted,

    /// Another player already holds this category.
    #[error("{0} has already been claimed")]
    AlreadyClaimed(WinCategory),

    /// The drawn numbers do not satisfy the claimed category.
    #[error("the drawn numbers do not satisfy {0}")]
    InvalidClaim(WinCategory),

    /// All 90 numbers have been drawn; nothing left to draw.
    #[error("all 90 numbers have been drawn")]
    DrawExhausted,
}
