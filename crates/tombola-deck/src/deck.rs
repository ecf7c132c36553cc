//! Deck loading and validation.
//!
//! The source format is a flat text file: each record opens with a
//! header line containing the `Cartella` marker, followed by exactly
//! three data rows of up to nine tab-separated cells. A blank or
//! non-numeric cell is an empty grid position. 90 records form 15
//! series of 6, grouped in file order.
//!
//! Validation is exhaustive and runs inside both constructors — a
//! corrupt source never yields a `Deck`. The checks mirror the grid
//! invariants: per card via [`Card::check`], per serie full coverage of
//! `1..=90` without repetition and the fixed column occupancy
//! `[9, 10, 10, 10, 10, 10, 10, 10, 11]`.

use crate::card::{COLUMNS, ROWS};
use crate::ids::{CARDS_PER_DECK, CARDS_PER_SERIE, SERIES_PER_DECK};
use crate::{Card, CardId, DeckError, SerieId};

/// The record header marker in the deck source.
const RECORD_MARKER: &str = "Cartella";

/// Populated cells each column must contribute across one serie.
const SERIE_COLUMN_OCCUPANCY: [usize; COLUMNS] = [9, 10, 10, 10, 10, 10, 10, 10, 11];

/// An ordered group of six cards that together cover `1..=90` exactly
/// once.
#[derive(Debug, Clone)]
pub struct Serie {
    cards: [Card; CARDS_PER_SERIE as usize],
}

impl Serie {
    /// The six cards, in deck order.
    pub fn cards(&self) -> &[Card; CARDS_PER_SERIE as usize] {
        &self.cards
    }

    /// Verifies the cross-card invariants for serie `id`: no repeated
    /// number, full coverage of `1..=90`, correct column occupancy.
    fn check(&self, id: SerieId) -> Result<(), DeckError> {
        let mut seen = [false; 91];
        let mut covered = 0usize;
        let mut occupancy = [0usize; COLUMNS];

        for card in &self.cards {
            for row in 0..ROWS {
                for column in 0..COLUMNS {
                    let Some(number) = card.rows()[row][column] else {
                        continue;
                    };
                    if seen[number as usize] {
                        return Err(DeckError::DuplicateNumber { serie: id, number });
                    }
                    seen[number as usize] = true;
                    covered += 1;
                    occupancy[column] += 1;
                }
            }
        }

        if covered != CARDS_PER_DECK as usize {
            return Err(DeckError::SerieCoverage { serie: id, found: covered });
        }
        for column in 0..COLUMNS {
            if occupancy[column] != SERIE_COLUMN_OCCUPANCY[column] {
                return Err(DeckError::ColumnOccupancy {
                    serie: id,
                    column,
                    found: occupancy[column],
                    expected: SERIE_COLUMN_OCCUPANCY[column],
                });
            }
        }
        Ok(())
    }
}

/// The validated, immutable universe of 90 cards.
#[derive(Debug, Clone)]
pub struct Deck {
    series: Vec<Serie>,
}

impl Deck {
    /// Parses and validates a deck from its text source.
    pub fn parse(source: &str) -> Result<Self, DeckError> {
        let cards = parse_records(source)?;
        if cards.len() != CARDS_PER_DECK as usize {
            return Err(DeckError::CardCount { found: cards.len() });
        }

        for (index, card) in cards.iter().enumerate() {
            card.check(CardId(index as u8 + 1))?;
        }

        let mut series = Vec::with_capacity(SERIES_PER_DECK as usize);
        let mut cards = cards.into_iter();
        for id in SerieId::all() {
            // Grouping is positional: serie s owns the next six records.
            let serie = Serie {
                cards: std::array::from_fn(|_| {
                    cards.next().expect("card count checked above")
                }),
            };
            serie.check(id)?;
            series.push(serie);
        }

        Ok(Self { series })
    }

    /// Parses a deck from raw file bytes.
    ///
    /// The deployed source files ship as UTF-16LE with a BOM; plain
    /// UTF-8 (with or without BOM) is accepted too, and stray NUL bytes
    /// are stripped before parsing.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DeckError> {
        Self::parse(&decode_source(bytes)?)
    }

    /// Looks up a card by id. `None` when the id is outside `1..=90`.
    pub fn card(&self, id: CardId) -> Option<&Card> {
        if !id.in_deck() {
            return None;
        }
        let serie = &self.series[id.serie().index()];
        Some(&serie.cards[id.index() % CARDS_PER_SERIE as usize])
    }

    /// Looks up a serie by id. `None` when the id is outside `1..=15`.
    pub fn serie(&self, id: SerieId) -> Option<&Serie> {
        if !id.in_deck() {
            return None;
        }
        Some(&self.series[id.index()])
    }

    /// The 15 series in deck order.
    pub fn series(&self) -> &[Serie] {
        &self.series
    }
}

/// Splits the source into cards: header marker, then three data rows.
/// Rows past the third of a record are ignored, as is anything before
/// the first header; a record closing with fewer than three rows is a
/// structural error.
fn parse_records(source: &str) -> Result<Vec<Card>, DeckError> {
    let mut cards = Vec::with_capacity(CARDS_PER_DECK as usize);
    let mut pending: Option<Vec<[Option<u8>; COLUMNS]>> = None;

    for line in source.lines() {
        if line.trim().is_empty() {
            continue;
        }
        if line.contains(RECORD_MARKER) {
            if let Some(rows) = pending.take() {
                cards.push(close_record(rows, cards.len())?);
            }
            pending = Some(Vec::with_capacity(ROWS));
        } else if let Some(rows) = pending.as_mut() {
            if rows.len() < ROWS {
                rows.push(parse_row(line));
            }
        }
    }
    if let Some(rows) = pending {
        cards.push(close_record(rows, cards.len())?);
    }

    Ok(cards)
}

fn close_record(rows: Vec<[Option<u8>; COLUMNS]>, parsed: usize) -> Result<Card, DeckError> {
    if rows.len() != ROWS {
        return Err(DeckError::RowCount {
            card: CardId(parsed as u8 + 1),
            found: rows.len(),
        });
    }
    let mut grid = [[None; COLUMNS]; ROWS];
    for (row, cells) in rows.into_iter().enumerate() {
        grid[row] = cells;
    }
    Ok(Card::from_rows(grid))
}

/// One tab-separated data row. Missing trailing cells and unparsable
/// cells both read as empty; cells past the ninth are dropped.
fn parse_row(line: &str) -> [Option<u8>; COLUMNS] {
    let mut cells = [None; COLUMNS];
    for (column, cell) in line.split('\t').take(COLUMNS).enumerate() {
        cells[column] = cell.trim().parse::<u8>().ok();
    }
    cells
}

fn decode_source(bytes: &[u8]) -> Result<String, DeckError> {
    let text = if let Some(body) = bytes.strip_prefix(&[0xFF, 0xFE]) {
        let units: Vec<u16> = body
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16(&units).map_err(|_| DeckError::Encoding)?
    } else {
        let body = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
        std::str::from_utf8(body)
            .map_err(|_| DeckError::Encoding)?
            .to_owned()
    };
    Ok(text.replace('\u{0}', ""))
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str =
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets/cartelle.tsv"));

    /// The sample source as mutable lines, for corrupting specific cells.
    fn sample_lines() -> Vec<String> {
        SAMPLE.lines().map(str::to_owned).collect()
    }

    fn parse_lines(lines: &[String]) -> Result<Deck, DeckError> {
        Deck::parse(&lines.join("\n"))
    }

    #[test]
    fn test_parse_sample_deck() {
        let deck = Deck::parse(SAMPLE).expect("sample deck must validate");
        assert_eq!(deck.series().len(), 15);
        for serie in deck.series() {
            assert_eq!(serie.cards().len(), 6);
        }
    }

    #[test]
    fn test_every_serie_covers_one_to_ninety() {
        let deck = Deck::parse(SAMPLE).unwrap();
        for serie in deck.series() {
            let mut seen = [false; 91];
            for card in serie.cards() {
                for n in card.numbers() {
                    assert!(!seen[n as usize], "duplicate {n}");
                    seen[n as usize] = true;
                }
            }
            assert!(seen[1..].iter().all(|&s| s));
        }
    }

    #[test]
    fn test_card_lookup_is_position_fixed() {
        let deck = Deck::parse(SAMPLE).unwrap();
        // Card 7 is the first card of serie 2, which in the sample deck
        // repeats the layout of card 1.
        assert_eq!(deck.card(CardId(7)), deck.card(CardId(1)));
        assert!(deck.card(CardId(90)).is_some());
        assert!(deck.card(CardId(0)).is_none());
        assert!(deck.card(CardId(91)).is_none());
        assert!(deck.serie(SerieId(15)).is_some());
        assert!(deck.serie(SerieId(16)).is_none());
    }

    #[test]
    fn test_parse_rejects_missing_card() {
        // Drop the last record (header + 3 rows).
        let lines = sample_lines();
        let truncated = &lines[..lines.len() - 4];
        let err = parse_lines(&truncated.to_vec()).unwrap_err();
        assert!(matches!(err, DeckError::CardCount { found: 89 }));
    }

    #[test]
    fn test_parse_rejects_record_with_two_rows() {
        let mut lines = sample_lines();
        // Remove the third data row of card 1 (line index 3).
        lines.remove(3);
        let err = parse_lines(&lines).unwrap_err();
        assert!(matches!(err, DeckError::RowCount { card: CardId(1), found: 2 }));
    }

    #[test]
    fn test_parse_rejects_non_numeric_cell_as_missing_number() {
        let mut lines = sample_lines();
        // Card 1, row 0: "1\t10\t\t30\t..." — corrupt the first cell.
        lines[1] = lines[1].replacen('1', "x", 1);
        let err = parse_lines(&lines).unwrap_err();
        assert!(matches!(
            err,
            DeckError::RowPopulation { card: CardId(1), row: 0, found: 4 }
        ));
    }

    #[test]
    fn test_parse_rejects_out_of_column_number() {
        let mut lines = sample_lines();
        // Card 1, row 2 holds 40 in column 4; 39 belongs to column 3.
        lines[3] = lines[3].replace("40", "39");
        let err = parse_lines(&lines).unwrap_err();
        assert!(matches!(
            err,
            DeckError::NumberOutOfColumn { card: CardId(1), column: 4, number: 39 }
        ));
    }

    #[test]
    fn test_parse_rejects_descending_column() {
        let mut lines = sample_lines();
        // Swap 1 (row 0) and 2 (row 1) in column 0 of card 1.
        lines[1] = lines[1].replacen("1\t", "2\t", 1);
        lines[2] = lines[2].replacen("2\t", "1\t", 1);
        let err = parse_lines(&lines).unwrap_err();
        assert!(matches!(err, DeckError::ColumnOrder { card: CardId(1), column: 0 }));
    }

    #[test]
    fn test_parse_rejects_duplicate_across_serie() {
        let mut lines = sample_lines();
        // Card 2, row 0 starts with 3; card 1 already holds 1.
        lines[5] = lines[5].replacen("3\t", "1\t", 1);
        let err = parse_lines(&lines).unwrap_err();
        assert!(matches!(err, DeckError::DuplicateNumber { serie: SerieId(1), number: 1 }));
    }

    #[test]
    fn test_lines_before_first_header_are_ignored() {
        let mut lines = sample_lines();
        lines.insert(0, "exported from sheet".to_owned());
        assert!(parse_lines(&lines).is_ok());
    }

    #[test]
    fn test_from_bytes_utf8() {
        assert!(Deck::from_bytes(SAMPLE.as_bytes()).is_ok());
    }

    #[test]
    fn test_from_bytes_utf16le_with_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in SAMPLE.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert!(Deck::from_bytes(&bytes).is_ok());
    }

    #[test]
    fn test_from_bytes_strips_nul_bytes() {
        let mut text = String::new();
        for ch in SAMPLE.chars() {
            text.push(ch);
            if ch == '\t' {
                text.push('\u{0}');
            }
        }
        assert!(Deck::from_bytes(text.as_bytes()).is_ok());
    }

    #[test]
    fn test_from_bytes_rejects_invalid_utf8() {
        let err = Deck::from_bytes(&[0x80, 0x81, 0x82]).unwrap_err();
        assert!(matches!(err, DeckError::Encoding));
    }
}
