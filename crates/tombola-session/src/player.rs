//! The durable player record.

use tombola_deck::{Card, CardId};
use tombola_protocol::{CardSelection, PlayerSummary, SessionKey};
use tombola_transport::ConnectionId;

/// One player's durable state, keyed by session in the registry.
///
/// Created on the first successful join and destroyed only by a game
/// reset. The connection handle is the only part that changes across a
/// disconnect/reconnect cycle; the dealt cards are populated once, when
/// the game starts.
#[derive(Debug, Clone)]
pub struct Player {
    session_key: SessionKey,
    nickname: String,
    selection: CardSelection,
    card_ids: Vec<CardId>,
    cards: Vec<Card>,
    pub(crate) connection: Option<ConnectionId>,
}

impl Player {
    /// Creates the record for a freshly joined player.
    pub fn new(
        session_key: SessionKey,
        nickname: String,
        selection: CardSelection,
        card_ids: Vec<CardId>,
        connection: ConnectionId,
    ) -> Self {
        Self {
            session_key,
            nickname,
            selection,
            card_ids,
            cards: Vec::new(),
            connection: Some(connection),
        }
    }

    pub fn session_key(&self) -> &SessionKey {
        &self.session_key
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn selection(&self) -> &CardSelection {
        &self.selection
    }

    /// The assigned card ids (resolved at join time).
    pub fn card_ids(&self) -> &[CardId] {
        &self.card_ids
    }

    /// The dealt cards; empty until the game starts.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The live connection currently speaking for this player, if any.
    pub fn connection(&self) -> Option<ConnectionId> {
        self.connection
    }

    /// Hands the player their resolved cards at game start.
    pub fn deal(&mut self, cards: Vec<Card>) {
        self.cards = cards;
    }

    /// The lobby-table row for this player.
    pub fn summary(&self) -> PlayerSummary {
        PlayerSummary {
            nickname: self.nickname.clone(),
            selection: self.selection.clone(),
            card_count: self.card_ids.len(),
            card_ids: self.card_ids.clone(),
        }
    }
}
