//! Authoritative game state for a Tombola session.
//!
//! One instance of [`GameCoordinator`] owns everything the game knows:
//! the session registry, the assigned-card tracker, the draw sequence,
//! the prize pool, and the winner board — all gathered in a single
//! [`GameState`] value. Inbound [`ClientEvent`]s go in, the state is
//! mutated, and `(Recipient, ServerEvent)` pairs come out for the
//! engine to deliver.
//!
//! Nothing here is thread-safe or async on purpose: handlers are short,
//! synchronous state transitions, and the engine guarantees they run
//! one at a time. That serialization is what makes the check-and-reserve
//! step of a join atomic without a lock.
//!
//! [`ClientEvent`]: tombola_protocol::ClientEvent

mod availability;
mod coordinator;
mod draw;
mod error;
mod prizes;
mod state;
mod wins;

pub use availability::AvailabilityTracker;
pub use coordinator::GameCoordinator;
pub use draw::{Draw, DrawSequencer};
pub use error::GameError;
pub use prizes::PrizePool;
pub use state::GameState;
pub use wins::validate_win;
