//! Tracks which of the 90 card ids are currently claimed.

use std::collections::HashSet;

use tombola_deck::{CardId, SerieId};

use crate::GameError;

/// The assigned-card set.
///
/// The tracker is the single source of truth for availability: a serie
/// is offered only while all six of its cards are free, and a join
/// reserves its whole request or nothing. Callers run strictly one at a
/// time (engine serialization), which is what makes check-and-reserve
/// indivisible.
#[derive(Debug, Default)]
pub struct AvailabilityTracker {
    assigned: HashSet<CardId>,
}

impl AvailabilityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves every id in `ids`, or nothing.
    ///
    /// Fails when any id is already assigned, repeated within the
    /// request (an id is only available once), or outside `1..=90`.
    pub fn try_assign(&mut self, ids: &[CardId]) -> Result<(), GameError> {
        let mut requested = HashSet::with_capacity(ids.len());
        for &id in ids {
            if !id.in_deck() || self.assigned.contains(&id) || !requested.insert(id) {
                return Err(GameError::CardsUnavailable);
            }
        }
        self.assigned.extend(requested);
        Ok(())
    }

    /// Returns ids to the available pool (pre-start disconnect).
    pub fn release(&mut self, ids: &[CardId]) {
        for id in ids {
            self.assigned.remove(id);
        }
    }

    pub fn is_assigned(&self, id: CardId) -> bool {
        self.assigned.contains(&id)
    }

    /// Series whose six cards are all still free, in deck order.
    pub fn available_series(&self) -> Vec<SerieId> {
        SerieId::all()
            .filter(|serie| serie.cards().iter().all(|id| !self.assigned.contains(id)))
            .collect()
    }

    /// Free card ids, in deck order.
    pub fn available_cards(&self) -> Vec<CardId> {
        (1..=90)
            .map(CardId)
            .filter(|id| !self.assigned.contains(id))
            .collect()
    }

    /// Number of ids currently assigned.
    pub fn assigned_count(&self) -> usize {
        self.assigned.len()
    }
}

// =========================================================================
// Tests
// =========================================================================
