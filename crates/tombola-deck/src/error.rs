//! Error type for deck loading and validation.
//!
//! Every structural variant names the offending card or serie, so a bad
//! source file can be fixed from the error alone. Deck errors are fatal:
//! they only occur at startup, and the process must not serve a game
//! from a corrupt deck.

use crate::{CardId, SerieId};

/// A violation found while parsing or validating a deck source.
#[derive(Debug, thiserror::Error)]
pub enum DeckError {
    /// The source is neither valid UTF-16LE (BOM) nor valid UTF-8.
    #[error("deck source is not valid UTF-8 or UTF-16")]
    Encoding,

    /// The source holds the wrong number of card records.
    #[error("deck source holds {found} cards, expected 90")]
    CardCount { found: usize },

    /// A record closed with the wrong number of data rows.
    #[error("card {card} has {found} rows, expected 3")]
    RowCount { card: CardId, found: usize },

    /// A row holds the wrong number of populated cells.
    #[error("card {card} row {row} holds {found} numbers, expected 5")]
    RowPopulation { card: CardId, row: usize, found: usize },

    /// A number sits outside its column's range.
    #[error("card {card} column {column} holds {number}, outside the column range")]
    NumberOutOfColumn { card: CardId, column: usize, number: u8 },

    /// Numbers within a column are not strictly ascending.
    #[error("card {card} column {column} is not in ascending order")]
    ColumnOrder { card: CardId, column: usize },

    /// A number appears on more than one card of the same serie.
    #[error("serie {serie} repeats the number {number}")]
    DuplicateNumber { serie: SerieId, number: u8 },

    /// A serie does not cover `1..=90`.
    #[error("serie {serie} covers {found} numbers, expected all 90")]
    SerieCoverage { serie: SerieId, found: usize },

    /// A serie's populated cells are distributed wrongly across columns.
    #[error("serie {serie} column {column} holds {found} numbers, expected {expected}")]
    ColumnOccupancy {
        serie: SerieId,
        column: usize,
        found: usize,
        expected: usize,
    },
}
