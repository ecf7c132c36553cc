//! Unified error type for the server crate.

use tombola_deck::DeckError;
use tombola_protocol::ProtocolError;
use tombola_transport::TransportError;

/// Top-level error wrapping the layer-specific ones, so `?` flows
/// through the bootstrap and the accept loop.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// A transport-level error (bind, accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A deck failed validation at startup. Fatal: the process must not
    /// serve a game from a corrupt deck.
    #[error("deck validation failed: {0}")]
    Deck(#[from] DeckError),

    /// Reading the deck source file failed.
    #[error("failed to read deck source: {0}")]
    Io(#[from] std::io::Error),
}
