//! Card universe for Tombola: 90 cards in 15 series of 6.
//!
//! This crate owns the deck layer:
//!
//! - **Identifiers** ([`CardId`], [`SerieId`]) — position-fixed ids;
//!   card *i* belongs to serie `ceil(i/6)`.
//! - **Model** ([`Card`], [`Serie`], [`Deck`]) — the 3×9 grids and
//!   their grouping.
//! - **Loading** ([`Deck::parse`], [`Deck::from_bytes`]) — the
//!   header-delimited tab-separated source format.
//! - **Errors** ([`DeckError`]) — every structural violation names the
//!   offending card or serie.
//!
//! A `Deck` only exists in validated form: both constructors run the
//! full integrity check and refuse to produce a value otherwise. The
//! server loads the deck once at startup and shares it immutably.

mod card;
mod deck;
mod error;
mod ids;

pub use card::Card;
pub use deck::{Deck, Serie};
pub use error::DeckError;
pub use ids::{CardId, SerieId};
