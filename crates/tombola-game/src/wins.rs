//! Win-claim validation.

use std::collections::HashSet;

use tombola_deck::Card;
use tombola_protocol::WinCategory;

/// Checks whether `cards` satisfy `category` against the drawn set.
///
/// Row categories (ambo through cinquina) need a single row holding at
/// least the category's count of drawn numbers; tombola needs every
/// number of one card. The first satisfying row or card decides — hits
/// never aggregate across cards. Pure: no state is touched.
pub fn validate_win(cards: &[Card], drawn: &HashSet<u8>, category: WinCategory) -> bool {
    cards.iter().any(|card| match category {
        WinCategory::Tombola => card.numbers().all(|n| drawn.contains(&n)),
        _ => card.rows().iter().any(|row| {
            let marked = row
                .iter()
                .flatten()
                .filter(|&n| drawn.contains(n))
                .count();
            marked >= category.row_target()
        }),
    })
}

// =========================================================================
// Tests
// =========================================================================
