//! Wire protocol for the Tombola server.
//!
//! This crate defines the language that clients and the coordinator
//! speak:
//!
//! - **Events** ([`ClientEvent`], [`ServerEvent`]) — one discriminated
//!   variant per message kind, named on the wire the way the clients
//!   bind them (`admin:join`, `player:declare-win`, `game:number-drawn`, …).
//! - **Shared types** ([`WinCategory`], [`PrizeTable`], [`WinnerBoard`],
//!   [`CardSelection`], [`PlayerSummary`], [`SessionKey`]) — the values
//!   those events carry.
//! - **Routing** ([`Recipient`]) — who an outbound event is for.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how events become
//!   frames and back.
//!
//! Payload shape is strict: unknown event tags or missing fields fail
//! decoding. The coordinator never sees a malformed event.

mod codec;
mod error;
mod events;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use events::{ClientEvent, ServerEvent};
pub use types::{
    CardSelection, PlayerSummary, PrizeTable, Recipient, SessionKey, WinCategory,
    WinnerBoard,
};
