//! End-to-end tests over real WebSockets: admin and players connect to
//! a running server and play through the protocol.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::Message;

use tombola::TombolaServer;
use tombola_deck::{CardId, Deck, SerieId};
use tombola_protocol::{CardSelection, ClientEvent, ServerEvent, SessionKey, WinCategory};

const SAMPLE: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets/cartelle.tsv"));

type Ws = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

async fn start() -> String {
    let deck = Deck::parse(SAMPLE).expect("sample deck");
    let server = TombolaServer::builder()
        .bind("127.0.0.1:0")
        .build(deck)
        .await
        .expect("server should build");
    let addr = server.local_addr().unwrap().to_string();
    tokio::spawn(async move {
        let _ = server.run().await;
    });
    tokio::time::sleep(Duration::from_millis(10)).await;
    addr
}

async fn ws(addr: &str) -> Ws {
    let (ws, _) = tokio_tungstenite::connect_async(format!("ws://{addr}"))
        .await
        .expect("client should connect");
    ws
}

async fn send(ws: &mut Ws, event: &ClientEvent) {
    let frame = serde_json::to_string(event).unwrap();
    ws.send(Message::Text(frame.into())).await.unwrap();
}

async fn recv(ws: &mut Ws) -> ServerEvent {
    let msg = tokio::time::timeout(Duration::from_secs(5), ws.next())
        .await
        .expect("timed out waiting for frame")
        .expect("stream ended")
        .expect("websocket error");
    serde_json::from_str(&msg.into_text().unwrap()).expect("valid server event")
}

/// Connects the admin and drains its joined snapshot.
async fn connect_admin(addr: &str) -> Ws {
    let mut admin = ws(addr).await;
    send(&mut admin, &ClientEvent::AdminJoin).await;
    assert!(matches!(recv(&mut admin).await, ServerEvent::AdminJoined { .. }));
    admin
}

/// Connects a player, joins a serie, and drains the two join replies.
async fn join_serie(addr: &str, nickname: &str, serie: u8) -> Ws {
    let mut player = ws(addr).await;
    send(
        &mut player,
        &ClientEvent::PlayerJoin {
            nickname: nickname.to_owned(),
            selection: CardSelection::Serie(SerieId(serie)),
            session_key: Some(SessionKey::from(nickname)),
        },
    )
    .await;
    assert!(matches!(recv(&mut player).await, ServerEvent::JoinSuccess { .. }));
    assert!(matches!(recv(&mut player).await, ServerEvent::Availability { .. }));
    player
}

#[tokio::test]
async fn test_admin_join_returns_lobby_snapshot() {
    let addr = start().await;
    let mut admin = ws(&addr).await;

    send(&mut admin, &ClientEvent::AdminJoin).await;

    let ServerEvent::AdminJoined { players } = recv(&mut admin).await else {
        panic!("expected AdminJoined");
    };
    assert!(players.is_empty());
}

#[tokio::test]
async fn test_join_notifies_player_admin_and_lobby() {
    let addr = start().await;
    let mut admin = connect_admin(&addr).await;

    let mut player = ws(&addr).await;
    send(
        &mut player,
        &ClientEvent::PlayerJoin {
            nickname: "anna".into(),
            selection: CardSelection::Serie(SerieId(2)),
            session_key: Some(SessionKey::from("anna-key")),
        },
    )
    .await;

    // Player: confirmation, then the availability broadcast.
    let ServerEvent::JoinSuccess { card_ids, card_count } = recv(&mut player).await else {
        panic!("expected JoinSuccess");
    };
    assert_eq!(card_count, 6);
    assert_eq!(card_ids, (7..=12).map(CardId).collect::<Vec<_>>());
    let ServerEvent::Availability { available_series, .. } = recv(&mut player).await else {
        panic!("expected Availability");
    };
    assert!(!available_series.contains(&SerieId(2)));

    // Admin: lobby row, then the same broadcast.
    assert!(matches!(
        recv(&mut admin).await,
        ServerEvent::LobbyUpdate { players } if players.len() == 1
    ));
    assert!(matches!(recv(&mut admin).await, ServerEvent::Availability { .. }));
}

#[tokio::test]
async fn test_requesting_availability_lists_everything_when_fresh() {
    let addr = start().await;
    let mut player = ws(&addr).await;

    send(&mut player, &ClientEvent::RequestAvailability).await;

    let ServerEvent::Availability { available_series, available_cards } =
        recv(&mut player).await
    else {
        panic!("expected Availability");
    };
    assert_eq!(available_series.len(), 15);
    assert_eq!(available_cards.len(), 90);
}

#[tokio::test]
async fn test_serie_collision_over_the_wire() {
    let addr = start().await;
    let _first = join_serie(&addr, "anna", 3).await;

    // The second player connects after the first join settled, so the
    // very next frame it sees is its own collision error.
    let mut second = ws(&addr).await;
    send(
        &mut second,
        &ClientEvent::PlayerJoin {
            nickname: "bruno".into(),
            selection: CardSelection::Serie(SerieId(3)),
            session_key: Some(SessionKey::from("bruno-key")),
        },
    )
    .await;

    assert!(matches!(recv(&mut second).await, ServerEvent::JoinError { .. }));
}

#[tokio::test]
async fn test_full_game_flow_with_reconnect() {
    let addr = start().await;
    let mut admin = connect_admin(&addr).await;
    let mut player = join_serie(&addr, "anna", 1).await;
    // Drain the lobby/availability updates triggered by the join.
    assert!(matches!(recv(&mut admin).await, ServerEvent::LobbyUpdate { .. }));
    assert!(matches!(recv(&mut admin).await, ServerEvent::Availability { .. }));

    // Cost reaches everyone.
    send(&mut admin, &ClientEvent::SetCost { cost: 2.0 }).await;
    assert!(matches!(recv(&mut admin).await, ServerEvent::CostUpdated { .. }));
    assert!(matches!(recv(&mut player).await, ServerEvent::CostUpdated { .. }));

    // Prize preview goes to the admin alone.
    send(&mut admin, &ClientEvent::CalculatePrizes).await;
    let ServerEvent::PrizesCalculated { total_cards, total_pot, prizes } =
        recv(&mut admin).await
    else {
        panic!("expected PrizesCalculated");
    };
    assert_eq!(total_cards, 6);
    assert_eq!(total_pot, 12.0);
    assert_eq!(prizes.tombola, 3.6);

    // Start: the player gets their cards, the admin gets the count.
    send(&mut admin, &ClientEvent::StartGame).await;
    let ServerEvent::GameStarted { cards, card_ids, .. } = recv(&mut player).await else {
        panic!("expected GameStarted");
    };
    assert_eq!(cards.len(), 6);
    assert_eq!(card_ids.len(), 6);
    assert!(matches!(
        recv(&mut admin).await,
        ServerEvent::GameStartedAdmin { total_players: 1 }
    ));

    // One draw reaches both.
    send(&mut admin, &ClientEvent::DrawNumber).await;
    let ServerEvent::NumberDrawn { number, total } = recv(&mut admin).await else {
        panic!("expected NumberDrawn");
    };
    assert!((1..=90).contains(&number));
    assert_eq!(total, 1);
    assert!(matches!(recv(&mut player).await, ServerEvent::NumberDrawn { .. }));

    // A single drawn number can satisfy no ambo.
    send(&mut player, &ClientEvent::DeclareWin { category: WinCategory::Ambo }).await;
    assert!(matches!(
        recv(&mut player).await,
        ServerEvent::WinInvalid { category: WinCategory::Ambo }
    ));

    // Drop the player and restore the session on a fresh socket.
    drop(player);
    assert!(matches!(recv(&mut admin).await, ServerEvent::LobbyUpdate { .. }));

    let mut revenant = ws(&addr).await;
    send(
        &mut revenant,
        &ClientEvent::PlayerReconnect {
            session_key: SessionKey::from("anna"),
            nickname: "anna".into(),
        },
    )
    .await;
    let ServerEvent::PlayerRestore { cards, drawn_numbers, started, .. } =
        recv(&mut revenant).await
    else {
        panic!("expected PlayerRestore");
    };
    assert!(started);
    assert_eq!(cards.len(), 6);
    assert_eq!(drawn_numbers.len(), 1);
    assert_eq!(drawn_numbers[0], number);
}

#[tokio::test]
async fn test_malformed_frames_are_dropped_not_fatal() {
    let addr = start().await;
    let mut client = ws(&addr).await;

    client
        .send(Message::Text("definitely not an event".into()))
        .await
        .unwrap();
    client
        .send(Message::Text(r#"{"type": "no:such-event"}"#.into()))
        .await
        .unwrap();

    // The connection is still alive and working.
    send(&mut client, &ClientEvent::AdminJoin).await;
    assert!(matches!(recv(&mut client).await, ServerEvent::AdminJoined { .. }));
}

#[tokio::test]
async fn test_reset_broadcast_reaches_players() {
    let addr = start().await;
    let mut admin = connect_admin(&addr).await;
    let mut player = join_serie(&addr, "anna", 5).await;
    assert!(matches!(recv(&mut admin).await, ServerEvent::LobbyUpdate { .. }));
    assert!(matches!(recv(&mut admin).await, ServerEvent::Availability { .. }));

    send(&mut admin, &ClientEvent::ResetGame).await;

    assert!(matches!(recv(&mut player).await, ServerEvent::GameReset));
    assert!(matches!(recv(&mut admin).await, ServerEvent::GameReset));

    // Everything is available again for the next round.
    send(&mut player, &ClientEvent::RequestAvailability).await;
    let ServerEvent::Availability { available_series, .. } = recv(&mut player).await else {
        panic!("expected Availability");
    };
    assert_eq!(available_series.len(), 15);
}
