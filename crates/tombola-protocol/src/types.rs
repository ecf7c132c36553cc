//! Shared wire types carried inside events.

use std::fmt;

use serde::{Deserialize, Serialize};
use tombola_deck::{CardId, SerieId};
use tombola_transport::ConnectionId;

// ---------------------------------------------------------------------------
// SessionKey
// ---------------------------------------------------------------------------

/// The durable client-side session identifier.
///
/// Chosen by the client and replayed on reconnect; it outlives any
/// single connection and is only forgotten on an explicit game reset.
/// When a join arrives without one, the server generates a random key
/// on the player's behalf.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionKey(pub String);

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionKey {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

// ---------------------------------------------------------------------------
// WinCategory
// ---------------------------------------------------------------------------

/// The progressive win categories, in claiming order.
///
/// Ambo through cinquina are satisfied by a single row holding 2–5
/// drawn numbers; tombola needs all 15 numbers of one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WinCategory {
    Ambo,
    Terno,
    Quaterna,
    Cinquina,
    Tombola,
}

impl WinCategory {
    /// All categories, cheapest first.
    pub fn all() -> [WinCategory; 5] {
        [
            Self::Ambo,
            Self::Terno,
            Self::Quaterna,
            Self::Cinquina,
            Self::Tombola,
        ]
    }

    /// Drawn numbers a single row must hold to satisfy this category.
    /// Tombola is the exception — it is judged on the whole card.
    pub fn row_target(self) -> usize {
        match self {
            Self::Ambo => 2,
            Self::Terno => 3,
            Self::Quaterna => 4,
            Self::Cinquina => 5,
            Self::Tombola => 15,
        }
    }
}

impl fmt::Display for WinCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ambo => "ambo",
            Self::Terno => "terno",
            Self::Quaterna => "quaterna",
            Self::Cinquina => "cinquina",
            Self::Tombola => "tombola",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// PrizeTable / WinnerBoard
// ---------------------------------------------------------------------------

/// The prize amount per category, in currency units.
///
/// Amounts are stored already rounded to 2 decimals; the pool math that
/// fills this table lives in the game layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PrizeTable {
    pub ambo: f64,
    pub terno: f64,
    pub quaterna: f64,
    pub cinquina: f64,
    pub tombola: f64,
}

impl PrizeTable {
    /// The stored amount for one category.
    pub fn get(&self, category: WinCategory) -> f64 {
        match category {
            WinCategory::Ambo => self.ambo,
            WinCategory::Terno => self.terno,
            WinCategory::Quaterna => self.quaterna,
            WinCategory::Cinquina => self.cinquina,
            WinCategory::Tombola => self.tombola,
        }
    }

    /// Overwrites the stored amount for one category.
    pub fn set(&mut self, category: WinCategory, amount: f64) {
        match category {
            WinCategory::Ambo => self.ambo = amount,
            WinCategory::Terno => self.terno = amount,
            WinCategory::Quaterna => self.quaterna = amount,
            WinCategory::Cinquina => self.cinquina = amount,
            WinCategory::Tombola => self.tombola = amount,
        }
    }
}

/// Who has claimed each category, by nickname. Unclaimed is `null` on
/// the wire. A category is set at most once until the admin rejects the
/// claim or resets the game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinnerBoard {
    pub ambo: Option<String>,
    pub terno: Option<String>,
    pub quaterna: Option<String>,
    pub cinquina: Option<String>,
    pub tombola: Option<String>,
}

impl WinnerBoard {
    fn slot(&mut self, category: WinCategory) -> &mut Option<String> {
        match category {
            WinCategory::Ambo => &mut self.ambo,
            WinCategory::Terno => &mut self.terno,
            WinCategory::Quaterna => &mut self.quaterna,
            WinCategory::Cinquina => &mut self.cinquina,
            WinCategory::Tombola => &mut self.tombola,
        }
    }

    /// The recorded claimant for one category.
    pub fn get(&self, category: WinCategory) -> Option<&str> {
        match category {
            WinCategory::Ambo => self.ambo.as_deref(),
            WinCategory::Terno => self.terno.as_deref(),
            WinCategory::Quaterna => self.quaterna.as_deref(),
            WinCategory::Cinquina => self.cinquina.as_deref(),
            WinCategory::Tombola => self.tombola.as_deref(),
        }
    }

    /// Returns `true` if the category already has a claimant.
    pub fn is_claimed(&self, category: WinCategory) -> bool {
        self.get(category).is_some()
    }

    /// Records a claimant for the category.
    pub fn claim(&mut self, category: WinCategory, nickname: String) {
        *self.slot(category) = Some(nickname);
    }

    /// Reopens a category after an admin rejection.
    pub fn clear(&mut self, category: WinCategory) {
        *self.slot(category) = None;
    }
}

// ---------------------------------------------------------------------------
// CardSelection / PlayerSummary
// ---------------------------------------------------------------------------

/// What a joining player asked for: a whole serie or a hand-picked list
/// of card ids.
///
/// Adjacently tagged on the wire: a mode field plus a selection value
/// whose type depends on the mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "selection_type", content = "selection", rename_all = "lowercase")]
pub enum CardSelection {
    /// All six cards of one serie.
    Serie(SerieId),
    /// An explicit list of card ids, kept exactly as sent — duplicates
    /// are not collapsed here and will fail assignment.
    Cards(Vec<CardId>),
}

/// One row of the admin's lobby table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub nickname: String,
    #[serde(flatten)]
    pub selection: CardSelection,
    pub card_count: usize,
    pub card_ids: Vec<CardId>,
}

// ---------------------------------------------------------------------------
// Recipient
// ---------------------------------------------------------------------------

/// Where an outbound event should be delivered.
///
/// The coordinator returns `(Recipient, ServerEvent)` pairs; the engine
/// resolves them against its live connection table. This type never
/// travels on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    /// Every live connection, admin included.
    All,
    /// The registered admin connection, if any.
    Admin,
    /// One specific connection.
    Conn(ConnectionId),
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_win_category_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&WinCategory::Ambo).unwrap(), "\"ambo\"");
        assert_eq!(
            serde_json::to_string(&WinCategory::Cinquina).unwrap(),
            "\"cinquina\""
        );
        let cat: WinCategory = serde_json::from_str("\"tombola\"").unwrap();
        assert_eq!(cat, WinCategory::Tombola);
    }

    #[test]
    fn test_win_category_row_targets() {
        assert_eq!(WinCategory::Ambo.row_target(), 2);
        assert_eq!(WinCategory::Terno.row_target(), 3);
        assert_eq!(WinCategory::Quaterna.row_target(), 4);
        assert_eq!(WinCategory::Cinquina.row_target(), 5);
        assert_eq!(WinCategory::Tombola.row_target(), 15);
    }

    #[test]
    fn test_card_selection_serie_wire_shape() {
        let sel = CardSelection::Serie(SerieId(3));
        let json: serde_json::Value = serde_json::to_value(&sel).unwrap();
        assert_eq!(json["selection_type"], "serie");
        assert_eq!(json["selection"], 3);
    }

    #[test]
    fn test_card_selection_cards_wire_shape() {
        let sel = CardSelection::Cards(vec![CardId(1), CardId(14)]);
        let json: serde_json::Value = serde_json::to_value(&sel).unwrap();
        assert_eq!(json["selection_type"], "cards");
        assert_eq!(json["selection"], serde_json::json!([1, 14]));
    }

    #[test]
    fn test_card_selection_rejects_mismatched_payload() {
        // "serie" mode with a list is a malformed payload, not a guess.
        let bad = r#"{"selection_type": "serie", "selection": [1, 2]}"#;
        assert!(serde_json::from_str::<CardSelection>(bad).is_err());
    }

    #[test]
    fn test_winner_board_claim_and_clear() {
        let mut board = WinnerBoard::default();
        assert!(!board.is_claimed(WinCategory::Ambo));

        board.claim(WinCategory::Ambo, "rosa".into());
        assert_eq!(board.get(WinCategory::Ambo), Some("rosa"));
        assert!(board.is_claimed(WinCategory::Ambo));
        assert!(!board.is_claimed(WinCategory::Terno));

        board.clear(WinCategory::Ambo);
        assert!(!board.is_claimed(WinCategory::Ambo));
    }

    #[test]
    fn test_winner_board_unclaimed_is_null_on_the_wire() {
        let mut board = WinnerBoard::default();
        board.claim(WinCategory::Terno, "bruno".into());
        let json: serde_json::Value = serde_json::to_value(&board).unwrap();
        assert!(json["ambo"].is_null());
        assert_eq!(json["terno"], "bruno");
    }

    #[test]
    fn test_prize_table_get_set_by_category() {
        let mut prizes = PrizeTable::default();
        prizes.set(WinCategory::Quaterna, 4.0);
        assert_eq!(prizes.get(WinCategory::Quaterna), 4.0);
        assert_eq!(prizes.get(WinCategory::Ambo), 0.0);
    }

    #[test]
    fn test_player_summary_flattens_selection() {
        let summary = PlayerSummary {
            nickname: "pina".into(),
            selection: CardSelection::Serie(SerieId(2)),
            card_count: 6,
            card_ids: SerieId(2).cards().to_vec(),
        };
        let json: serde_json::Value = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["nickname"], "pina");
        assert_eq!(json["selection_type"], "serie");
        assert_eq!(json["selection"], 2);
        assert_eq!(json["card_count"], 6);
        assert_eq!(json["card_ids"][0], 7);
    }

    #[test]
    fn test_session_key_is_transparent() {
        let key = SessionKey::from("session_abc");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"session_abc\"");
        assert_eq!(key.to_string(), "session_abc");
    }
}
