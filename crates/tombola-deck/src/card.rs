//! A single Tombola card: a 3×9 grid holding 15 numbers.
//!
//! Each row carries exactly 5 numbers; column *c* may only hold numbers
//! from its decade (column 0 starts at 1, column 8 runs through 90), and
//! numbers within a column ascend top to bottom. Those invariants are
//! enforced by deck validation, not by this type — a `Card` is plain
//! data so the parser can build it before checking it.

use serde::{Deserialize, Serialize};

use crate::{CardId, DeckError};

/// Rows on a card.
pub const ROWS: usize = 3;

/// Columns on a card.
pub const COLUMNS: usize = 9;

/// Numbers on each row.
pub const NUMBERS_PER_ROW: usize = 5;

/// A 3×9 grid of optional numbers in `1..=90`.
///
/// Serializes transparently as three arrays of nine numbers-or-null,
/// the shape the clients render directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Card {
    rows: [[Option<u8>; COLUMNS]; ROWS],
}

impl Card {
    /// Builds a card from raw rows. No validation happens here; see
    /// [`Card::check`].
    pub fn from_rows(rows: [[Option<u8>; COLUMNS]; ROWS]) -> Self {
        Self { rows }
    }

    /// The raw grid.
    pub fn rows(&self) -> &[[Option<u8>; COLUMNS]; ROWS] {
        &self.rows
    }

    /// The numbers populated on one row, left to right.
    pub fn row_numbers(&self, row: usize) -> impl Iterator<Item = u8> + '_ {
        self.rows[row].iter().flatten().copied()
    }

    /// All 15 numbers on the card, row by row.
    pub fn numbers(&self) -> impl Iterator<Item = u8> + '_ {
        self.rows.iter().flat_map(|row| row.iter().flatten().copied())
    }

    /// The inclusive number range column `column` may hold.
    pub fn column_range(column: usize) -> (u8, u8) {
        let lo = if column == 0 { 1 } else { column as u8 * 10 };
        let hi = if column == COLUMNS - 1 { 90 } else { column as u8 * 10 + 9 };
        (lo, hi)
    }

    /// Verifies the per-card invariants: 5 numbers per row, column
    /// ranges respected, columns strictly ascending.
    ///
    /// `id` only labels the error; cross-card checks (duplicates,
    /// coverage, occupancy) live in serie validation.
    pub(crate) fn check(&self, id: CardId) -> Result<(), DeckError> {
        for (row, cells) in self.rows.iter().enumerate() {
            let found = cells.iter().flatten().count();
            if found != NUMBERS_PER_ROW {
                return Err(DeckError::RowPopulation { card: id, row, found });
            }
        }

        for column in 0..COLUMNS {
            let (lo, hi) = Self::column_range(column);
            let mut previous: Option<u8> = None;
            for row in 0..ROWS {
                let Some(number) = self.rows[row][column] else {
                    continue;
                };
                if number < lo || number > hi {
                    return Err(DeckError::NumberOutOfColumn { card: id, column, number });
                }
                if previous.is_some_and(|p| p >= number) {
                    return Err(DeckError::ColumnOrder { card: id, column });
                }
                previous = Some(number);
            }
        }

        Ok(())
    }
}
