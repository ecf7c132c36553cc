//! The inbound and outbound event catalog.
//!
//! Every frame on the wire is one of these variants, discriminated by a
//! `type` field carrying the colon-namespaced event name the clients
//! bind to (`admin:join`, `game:number-drawn`, …). Inbound payloads are
//! strict: a missing field or unknown tag fails decoding, and the frame
//! is dropped before it reaches the coordinator.

use serde::{Deserialize, Serialize};
use tombola_deck::{Card, CardId, SerieId};

use crate::{CardSelection, PlayerSummary, PrizeTable, SessionKey, WinCategory, WinnerBoard};

/// Everything a client can send.
///
/// `admin:*` events are accepted only from the registered admin
/// connection; the coordinator silently ignores them from anyone else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientEvent {
    /// Registers the sender as the admin and returns the lobby snapshot.
    #[serde(rename = "admin:join")]
    AdminJoin,

    /// Re-registers the admin and returns the full restore snapshot.
    /// Honored unconditionally for any session key.
    #[serde(rename = "admin:reconnect")]
    AdminReconnect {
        session_key: SessionKey,
        nickname: String,
    },

    /// Asks for the currently available series and card ids.
    #[serde(rename = "player:request-availability")]
    RequestAvailability,

    /// Restores a previous session, or silently does nothing if the key
    /// is unknown (the client then proceeds with an ordinary join).
    #[serde(rename = "player:reconnect")]
    PlayerReconnect {
        session_key: SessionKey,
        nickname: String,
    },

    /// Attempts to join with a card selection.
    #[serde(rename = "player:join")]
    PlayerJoin {
        nickname: String,
        #[serde(flatten)]
        selection: CardSelection,
        /// Missing when the client has no stored session; the server
        /// then generates one.
        #[serde(default)]
        session_key: Option<SessionKey>,
    },

    /// Sets the cost per card; broadcast to everyone.
    #[serde(rename = "admin:set-cost")]
    SetCost { cost: f64 },

    /// Computes the prize pool from cards sold × cost.
    #[serde(rename = "admin:calculate-prizes")]
    CalculatePrizes,

    /// Adds a (possibly negative) delta to one prize category.
    #[serde(rename = "admin:adjust-prize")]
    AdjustPrize { category: WinCategory, amount: f64 },

    /// Starts the game: freezes assignment and deals cards.
    #[serde(rename = "admin:start-game")]
    StartGame,

    /// Draws the next number.
    #[serde(rename = "admin:draw-number")]
    DrawNumber,

    /// Claims a win category.
    #[serde(rename = "player:declare-win")]
    DeclareWin { category: WinCategory },

    /// Confirms or rejects a pending win claim.
    #[serde(rename = "admin:validate-win")]
    ValidateWin {
        nickname: String,
        category: WinCategory,
        valid: bool,
    },

    /// Clears the whole game back to the lobby.
    #[serde(rename = "admin:reset-game")]
    ResetGame,
}

/// Everything the server can send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerEvent {
    /// Reply to `admin:join`: the current lobby.
    #[serde(rename = "admin:joined")]
    AdminJoined { players: Vec<PlayerSummary> },

    /// Reply to `admin:reconnect`: the full game snapshot.
    #[serde(rename = "admin:game-restore")]
    AdminRestore {
        started: bool,
        drawn_numbers: Vec<u8>,
        players: Vec<PlayerSummary>,
        prizes: PrizeTable,
    },

    /// Current availability; sent on request and broadcast whenever the
    /// assigned set changes before the game starts.
    #[serde(rename = "cards:availability")]
    Availability {
        available_series: Vec<SerieId>,
        available_cards: Vec<CardId>,
    },

    /// Reply to a successful `player:reconnect`: the player's snapshot.
    #[serde(rename = "game:restore")]
    PlayerRestore {
        cards: Vec<Card>,
        card_ids: Vec<CardId>,
        drawn_numbers: Vec<u8>,
        started: bool,
        winners: WinnerBoard,
    },

    /// Reply to a successful join (also replayed on pre-start reconnect
    /// so the waiting screen can restore).
    #[serde(rename = "join:success")]
    JoinSuccess {
        card_ids: Vec<CardId>,
        card_count: usize,
    },

    /// Reply to a failed join: the requested cards are taken (or the
    /// game has already started).
    #[serde(rename = "join:error")]
    JoinError { message: String },

    /// The admin's lobby table changed.
    #[serde(rename = "lobby:update")]
    LobbyUpdate { players: Vec<PlayerSummary> },

    /// The cost per card changed.
    #[serde(rename = "cost:updated")]
    CostUpdated { cost: f64 },

    /// Reply to `admin:calculate-prizes`.
    #[serde(rename = "prizes:calculated")]
    PrizesCalculated {
        total_cards: usize,
        total_pot: f64,
        prizes: PrizeTable,
    },

    /// Reply to `admin:adjust-prize`.
    #[serde(rename = "prizes:updated")]
    PrizesUpdated { prizes: PrizeTable },

    /// Sent individually to each player when the game starts, carrying
    /// their dealt cards.
    #[serde(rename = "game:started")]
    GameStarted {
        cards: Vec<Card>,
        card_ids: Vec<CardId>,
        prizes: PrizeTable,
    },

    /// Sent to the admin when the game starts.
    #[serde(rename = "game:started-admin")]
    GameStartedAdmin { total_players: usize },

    /// A number was drawn; broadcast to everyone.
    #[serde(rename = "game:number-drawn")]
    NumberDrawn { number: u8, total: usize },

    /// All 90 numbers have been drawn; nothing was mutated.
    #[serde(rename = "game:no-numbers-left")]
    NoNumbersLeft,

    /// Reply to the claimant: claim recorded, pending admin review.
    #[serde(rename = "win:declared")]
    WinDeclared { category: WinCategory },

    /// Reply to the claimant: the drawn numbers do not satisfy the
    /// category.
    #[serde(rename = "win:invalid")]
    WinInvalid { category: WinCategory },

    /// Reply to the claimant: someone already holds this category.
    #[serde(rename = "win:already-claimed")]
    WinAlreadyClaimed { category: WinCategory },

    /// Admin notification of a pending claim, with everything needed to
    /// check it by eye.
    #[serde(rename = "admin:win-declared")]
    WinPending {
        nickname: String,
        category: WinCategory,
        cards: Vec<Card>,
        card_ids: Vec<CardId>,
        drawn_numbers: Vec<u8>,
    },

    /// The admin confirmed the claim; broadcast with the prize amount.
    #[serde(rename = "win:confirmed")]
    WinConfirmed {
        nickname: String,
        category: WinCategory,
        prize: f64,
    },

    /// The admin rejected the claim; the category is open again.
    #[serde(rename = "win:rejected")]
    WinRejected {
        nickname: String,
        category: WinCategory,
    },

    /// The game was reset; all state is gone.
    #[serde(rename = "game:reset")]
    GameReset,
}

// =========================================================================
// Tests
// =========================================================================
