//! The coordinator: every inbound event against one shared state.
//!
//! [`GameCoordinator::handle`] is the only entry point for client
//! events, and [`GameCoordinator::handle_disconnect`] for closed
//! connections. Both are plain synchronous functions: the engine calls
//! them one event at a time, so each handler sees and leaves a
//! consistent state with no locking.
//!
//! The lifecycle is lobby → running → reset-to-lobby:
//! - in the lobby, joins reserve cards and the admin shapes the pool;
//! - `admin:start-game` freezes assignment, deals cards, and opens
//!   draws and win claims;
//! - `admin:reset-game` replaces the state with a fresh lobby.
//!
//! Admin-prefixed events are honored only from the registered admin
//! connection and silently ignored from anyone else — a no-op, not an
//! error, so callers must not wait for a reply.

use std::collections::HashSet;
use std::sync::Arc;

use tombola_deck::{Card, CardId, Deck};
use tombola_protocol::{
    CardSelection, ClientEvent, Recipient, ServerEvent, SessionKey, WinCategory,
};
use tombola_session::{generate_session_key, Player};
use tombola_transport::ConnectionId;

use crate::{DrawSequencer, GameError, GameState};

/// Most cards a single player may hold.
const MAX_CARDS_PER_PLAYER: usize = 6;

/// Outbound events with their routing.
type Outbound = Vec<(Recipient, ServerEvent)>;

/// Drives one game against one [`GameState`].
pub struct GameCoordinator {
    deck: Arc<Deck>,
    state: GameState,
}

impl GameCoordinator {
    /// Creates a coordinator over a validated deck, starting in an
    /// empty lobby.
    pub fn new(deck: Arc<Deck>) -> Self {
        Self {
            deck,
            state: GameState::new(),
        }
    }

    /// Read access to the current state (used by tests and snapshots).
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Processes one client event and returns the outbound fan-out.
    pub fn handle(&mut self, conn: ConnectionId, event: ClientEvent) -> Outbound {
        match event {
            ClientEvent::AdminJoin => self.admin_join(conn),
            ClientEvent::AdminReconnect { .. } => self.admin_reconnect(conn),
            ClientEvent::RequestAvailability => {
                vec![(Recipient::Conn(conn), self.availability())]
            }
            ClientEvent::PlayerReconnect { session_key, .. } => {
                self.player_reconnect(conn, session_key)
            }
            ClientEvent::PlayerJoin {
                nickname,
                selection,
                session_key,
            } => self.player_join(conn, nickname, selection, session_key),
            ClientEvent::SetCost { cost } => self.admin_only(conn, |game| {
                game.state.cost_per_card = cost;
                tracing::info!(cost, "cost per card set");
                vec![(Recipient::All, ServerEvent::CostUpdated { cost })]
            }),
            ClientEvent::CalculatePrizes => self.admin_only(conn, |game| {
                let sold = game.state.registry.cards_sold();
                let (pot, prizes) =
                    game.state.prizes.calculate(sold, game.state.cost_per_card);
                tracing::info!(cards = sold, pot, "prizes calculated");
                vec![(
                    Recipient::Admin,
                    ServerEvent::PrizesCalculated {
                        total_cards: sold,
                        total_pot: pot,
                        prizes,
                    },
                )]
            }),
            ClientEvent::AdjustPrize { category, amount } => {
                self.admin_only(conn, |game| {
                    let prizes = game.state.prizes.adjust(category, amount);
                    vec![(Recipient::Admin, ServerEvent::PrizesUpdated { prizes })]
                })
            }
            ClientEvent::StartGame => self.admin_only(conn, Self::start_game),
            ClientEvent::DrawNumber => self.admin_only(conn, Self::draw_number),
            ClientEvent::DeclareWin { category } => self.declare_win(conn, category),
            ClientEvent::ValidateWin {
                nickname,
                category,
                valid,
            } => self.admin_only(conn, |game| game.validate_win(nickname, category, valid)),
            ClientEvent::ResetGame => self.admin_only(conn, Self::reset_game),
        }
    }

    /// Cleans up after a dropped connection.
    ///
    /// The admin slot is vacated; a joined player is detached from the
    /// connection index but keeps their durable session. Before the
    /// game starts their cards return to the pool.
    pub fn handle_disconnect(&mut self, conn: ConnectionId) -> Outbound {
        if self.state.admin == Some(conn) {
            self.state.admin = None;
            tracing::info!(%conn, "admin disconnected");
            return Vec::new();
        }

        let Some(player) = self.state.registry.release(conn) else {
            return Vec::new();
        };
        let nickname = player.nickname().to_owned();
        let card_ids = player.card_ids().to_vec();

        let mut out = Vec::new();
        if !self.state.started {
            self.state.assigned.release(&card_ids);
            out.push((Recipient::All, self.availability()));
        }
        out.push((Recipient::Admin, self.lobby_update()));
        tracing::info!(%conn, %nickname, "player disconnected");
        out
    }

    // -- Admin lifecycle ---------------------------------------------------

    fn admin_join(&mut self, conn: ConnectionId) -> Outbound {
        self.state.admin = Some(conn);
        tracing::info!(%conn, "admin joined");
        vec![(
            Recipient::Conn(conn),
            ServerEvent::AdminJoined {
                players: self.state.registry.connected_summaries(),
            },
        )]
    }

    /// Re-registers the admin and ships the full snapshot. Permissive
    /// on purpose: any session key is honored.
    fn admin_reconnect(&mut self, conn: ConnectionId) -> Outbound {
        self.state.admin = Some(conn);
        tracing::info!(%conn, "admin reconnected");
        vec![(
            Recipient::Conn(conn),
            ServerEvent::AdminRestore {
                started: self.state.started,
                drawn_numbers: self.state.draws.drawn().to_vec(),
                players: self.state.registry.connected_summaries(),
                prizes: *self.state.prizes.table(),
            },
        )]
    }

    /// Runs `action` only when `conn` is the registered admin; anything
    /// else is dropped without a reply.
    fn admin_only(
        &mut self,
        conn: ConnectionId,
        action: impl FnOnce(&mut Self) -> Outbound,
    ) -> Outbound {
        if self.state.admin != Some(conn) {
            tracing::debug!(%conn, "ignoring admin action from non-admin");
            return Vec::new();
        }
        action(self)
    }

    // -- Joining and reconnection ------------------------------------------

    fn player_join(
        &mut self,
        conn: ConnectionId,
        nickname: String,
        selection: CardSelection,
        session_key: Option<SessionKey>,
    ) -> Outbound {
        let resolved = resolve_card_ids(&self.state, &selection);
        let assigned =
            resolved.and_then(|ids| self.state.assigned.try_assign(&ids).map(|()| ids));
        let card_ids = match assigned {
            Ok(ids) => ids,
            Err(err) => {
                tracing::debug!(%conn, %nickname, %err, "join rejected");
                return vec![(
                    Recipient::Conn(conn),
                    ServerEvent::JoinError {
                        message: err.to_string(),
                    },
                )];
            }
        };

        let session_key = session_key.unwrap_or_else(generate_session_key);
        tracing::info!(%conn, %nickname, cards = card_ids.len(), "player joined");
        self.state.registry.register(Player::new(
            session_key,
            nickname,
            selection,
            card_ids.clone(),
            conn,
        ));

        vec![
            (
                Recipient::Conn(conn),
                ServerEvent::JoinSuccess {
                    card_count: card_ids.len(),
                    card_ids,
                },
            ),
            (Recipient::Admin, self.lobby_update()),
            (Recipient::All, self.availability()),
        ]
    }

    /// Restores a session onto a new connection, or does nothing for an
    /// unknown key (the client then joins normally). Idempotent: beyond
    /// the rebinding, the state is untouched.
    fn player_reconnect(&mut self, conn: ConnectionId, session_key: SessionKey) -> Outbound {
        let started = self.state.started;
        let drawn_numbers = self.state.draws.drawn().to_vec();
        let winners = self.state.winners.clone();

        let Some(player) = self.state.registry.rebind(&session_key, conn) else {
            tracing::debug!(%conn, session = %session_key, "no session to restore");
            return Vec::new();
        };

        let card_ids = player.card_ids().to_vec();
        let mut out = vec![(
            Recipient::Conn(conn),
            ServerEvent::PlayerRestore {
                cards: player.cards().to_vec(),
                card_ids: card_ids.clone(),
                drawn_numbers,
                started,
                winners,
            },
        )];
        if !started {
            // Back to the waiting screen with the same assignment.
            out.push((
                Recipient::Conn(conn),
                ServerEvent::JoinSuccess {
                    card_count: card_ids.len(),
                    card_ids,
                },
            ));
        }
        out
    }

    // -- Running the game --------------------------------------------------

    fn start_game(&mut self) -> Outbound {
        if self.state.started {
            tracing::debug!("ignoring start: game already running");
            return Vec::new();
        }
        self.state.started = true;
        self.state.draws = DrawSequencer::new();
        let prizes = *self.state.prizes.table();

        let mut out = Vec::new();
        for player in self.state.registry.players_mut() {
            let Some(conn) = player.connection() else {
                continue;
            };
            let cards = lookup_cards(&self.deck, player.card_ids());
            player.deal(cards.clone());
            out.push((
                Recipient::Conn(conn),
                ServerEvent::GameStarted {
                    cards,
                    card_ids: player.card_ids().to_vec(),
                    prizes,
                },
            ));
        }

        let total_players = self.state.registry.connected_count();
        tracing::info!(players = total_players, "game started");
        out.push((
            Recipient::Admin,
            ServerEvent::GameStartedAdmin { total_players },
        ));
        out
    }

    fn draw_number(&mut self) -> Outbound {
        if !self.state.started {
            tracing::debug!("ignoring draw: game not started");
            return Vec::new();
        }
        match self.state.draws.draw() {
            Ok(draw) => {
                tracing::info!(number = draw.number, total = draw.total, "number drawn");
                vec![(
                    Recipient::All,
                    ServerEvent::NumberDrawn {
                        number: draw.number,
                        total: draw.total,
                    },
                )]
            }
            Err(GameError::DrawExhausted) => {
                vec![(Recipient::Admin, ServerEvent::NoNumbersLeft)]
            }
            Err(_) => Vec::new(),
        }
    }

    // -- Win claims --------------------------------------------------------

    fn declare_win(&mut self, conn: ConnectionId, category: WinCategory) -> Outbound {
        let Some(player) = self.state.registry.by_connection(conn) else {
            return Vec::new();
        };
        let nickname = player.nickname().to_owned();
        let cards = player.cards().to_vec();
        let card_ids = player.card_ids().to_vec();

        match self.check_claim(&cards, category) {
            Ok(()) => {
                self.state.winners.claim(category, nickname.clone());
                tracing::info!(%nickname, %category, "win declared, pending admin review");
                vec![
                    (
                        Recipient::Admin,
                        ServerEvent::WinPending {
                            nickname,
                            category,
                            cards,
                            card_ids,
                            drawn_numbers: self.state.draws.drawn().to_vec(),
                        },
                    ),
                    (Recipient::Conn(conn), ServerEvent::WinDeclared { category }),
                ]
            }
            Err(GameError::AlreadyClaimed(_)) => {
                vec![(Recipient::Conn(conn), ServerEvent::WinAlreadyClaimed { category })]
            }
            Err(_) => {
                vec![(Recipient::Conn(conn), ServerEvent::WinInvalid { category })]
            }
        }
    }

    /// A category already claimed is refused without re-validation;
    /// otherwise the claim stands or falls on the drawn numbers alone.
    fn check_claim(&self, cards: &[Card], category: WinCategory) -> Result<(), GameError> {
        if self.state.winners.is_claimed(category) {
            return Err(GameError::AlreadyClaimed(category));
        }
        let drawn: HashSet<u8> = self.state.draws.drawn().iter().copied().collect();
        if !crate::validate_win(cards, &drawn, category) {
            return Err(GameError::InvalidClaim(category));
        }
        Ok(())
    }

    fn validate_win(
        &mut self,
        nickname: String,
        category: WinCategory,
        valid: bool,
    ) -> Outbound {
        if valid {
            let prize = self.state.prizes.amount(category);
            tracing::info!(%nickname, %category, prize, "win confirmed");
            vec![(
                Recipient::All,
                ServerEvent::WinConfirmed {
                    nickname,
                    category,
                    prize,
                },
            )]
        } else {
            // Reopen the category for other claimants.
            self.state.winners.clear(category);
            tracing::info!(%nickname, %category, "win rejected, category reopened");
            vec![(
                Recipient::All,
                ServerEvent::WinRejected { nickname, category },
            )]
        }
    }

    // -- Reset -------------------------------------------------------------

    /// Replaces the state with a fresh lobby. The admin connection is
    /// the one thing that survives — the reset came from it.
    fn reset_game(&mut self) -> Outbound {
        let admin = self.state.admin;
        self.state = GameState::new();
        self.state.admin = admin;
        tracing::info!("game reset");
        vec![(Recipient::All, ServerEvent::GameReset)]
    }

    // -- Snapshots ---------------------------------------------------------

    fn availability(&self) -> ServerEvent {
        ServerEvent::Availability {
            available_series: self.state.assigned.available_series(),
            available_cards: self.state.assigned.available_cards(),
        }
    }

    fn lobby_update(&self) -> ServerEvent {
        ServerEvent::LobbyUpdate {
            players: self.state.registry.connected_summaries(),
        }
    }
}

/// Expands a selection to concrete card ids.
///
/// A serie expands to its six cards; a manual list passes through
/// unchanged — duplicates are left in so the tracker rejects them. The
/// player-facing size bound (1–6 cards) is enforced here.
fn resolve_card_ids(state: &GameState, selection: &CardSelection) -> Result<Vec<CardId>, GameError> {
    if state.started {
        // Assignment is frozen once cards are dealt.
        return Err(GameError::AlreadyStarted);
    }
    match selection {
        CardSelection::Serie(serie) if serie.in_deck() => Ok(serie.cards().to_vec()),
        CardSelection::Serie(_) => Err(GameError::CardsUnavailable),
        CardSelection::Cards(ids) if (1..=MAX_CARDS_PER_PLAYER).contains(&ids.len()) => {
            Ok(ids.clone())
        }
        CardSelection::Cards(_) => Err(GameError::CardsUnavailable),
    }
}

fn lookup_cards(deck: &Deck, ids: &[CardId]) -> Vec<Card> {
    // Ids were bounds-checked at assignment time.
    ids.iter().filter_map(|id| deck.card(*id)).cloned().collect()
}
