//! Prize-pool accounting.
//!
//! The pot is cards sold × cost per card, split into fixed shares:
//! ambo 10%, terno 15%, quaterna 20%, cinquina 25%, tombola 30%. Every
//! amount that lands in the table is rounded to currency precision.

use tombola_protocol::{PrizeTable, WinCategory};

/// Percentage share of the pot per category.
const SHARES: [(WinCategory, f64); 5] = [
    (WinCategory::Ambo, 0.10),
    (WinCategory::Terno, 0.15),
    (WinCategory::Quaterna, 0.20),
    (WinCategory::Cinquina, 0.25),
    (WinCategory::Tombola, 0.30),
];

/// The stored prize amounts and the math that fills them.
#[derive(Debug, Default)]
pub struct PrizePool {
    table: PrizeTable,
}

impl PrizePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes and stores the split for the given sales, returning the
    /// rounded pot and the new table.
    pub fn calculate(&mut self, cards_sold: usize, cost_per_card: f64) -> (f64, PrizeTable) {
        let pot = cards_sold as f64 * cost_per_card;
        for (category, share) in SHARES {
            self.table.set(category, round_currency(pot * share));
        }
        (round_currency(pot), self.table)
    }

    /// Adds a delta (possibly negative) to one category and returns the
    /// new table.
    pub fn adjust(&mut self, category: WinCategory, delta: f64) -> PrizeTable {
        let amount = round_currency(self.table.get(category) + delta);
        self.table.set(category, amount);
        self.table
    }

    /// The stored amount for one category.
    pub fn amount(&self, category: WinCategory) -> f64 {
        self.table.get(category)
    }

    pub fn table(&self) -> &PrizeTable {
        &self.table
    }
}

/// Rounds to 2 decimal places.
fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// =========================================================================
// Tests
// =========================================================================
