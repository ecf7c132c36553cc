//! Position-fixed identifiers for cards and series.
//!
//! Ids are 1-indexed and never reassigned: card 1 is the first record in
//! the deck source, serie 1 owns cards 1–6, serie 15 owns cards 85–90.
//! Newtype wrappers keep the two id spaces from being mixed up — a
//! `SerieId` cannot be passed where a `CardId` is expected even though
//! both are a `u8` underneath.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Cards per serie.
pub const CARDS_PER_SERIE: u8 = 6;

/// Series in a full deck.
pub const SERIES_PER_DECK: u8 = 15;

/// Cards in a full deck.
pub const CARDS_PER_DECK: u8 = CARDS_PER_SERIE * SERIES_PER_DECK;

/// A card identifier in `1..=90`.
///
/// `#[serde(transparent)]` makes it travel on the wire as a plain
/// number, which is what the clients expect in availability lists and
/// join payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u8);

impl CardId {
    /// Returns `true` if this id falls inside the fixed 90-card universe.
    pub fn in_deck(self) -> bool {
        (1..=CARDS_PER_DECK).contains(&self.0)
    }

    /// The serie this card belongs to: `ceil(id / 6)`.
    pub fn serie(self) -> SerieId {
        SerieId((self.0 + CARDS_PER_SERIE - 1) / CARDS_PER_SERIE)
    }

    /// Zero-based position of this card within the deck.
    pub(crate) fn index(self) -> usize {
        self.0 as usize - 1
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A serie identifier in `1..=15`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SerieId(pub u8);

impl SerieId {
    /// Returns `true` if this id falls inside the fixed 15-serie universe.
    pub fn in_deck(self) -> bool {
        (1..=SERIES_PER_DECK).contains(&self.0)
    }

    /// The six card ids owned by this serie: `[(s-1)*6+1 ..= s*6]`.
    pub fn cards(self) -> [CardId; CARDS_PER_SERIE as usize] {
        let first = (self.0 - 1) * CARDS_PER_SERIE + 1;
        [
            CardId(first),
            CardId(first + 1),
            CardId(first + 2),
            CardId(first + 3),
            CardId(first + 4),
            CardId(first + 5),
        ]
    }

    /// Iterates all serie ids in deck order.
    pub fn all() -> impl Iterator<Item = SerieId> {
        (1..=SERIES_PER_DECK).map(SerieId)
    }

    /// Zero-based position of this serie within the deck.
    pub(crate) fn index(self) -> usize {
        self.0 as usize - 1
    }
}

impl fmt::Display for SerieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
