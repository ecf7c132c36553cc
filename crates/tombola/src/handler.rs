//! Per-connection handler: frame pump between one socket and the engine.
//!
//! Each accepted connection gets its own task running this handler. The
//! flow is deliberately thin:
//!   1. Attach an outbound channel to the engine and spawn a writer
//!      task draining it into the socket.
//!   2. Loop: receive frames, decode, enqueue on the engine.
//!   3. On close or error, detach — the engine runs the disconnect
//!      logic (card release, lobby update).
//!
//! Malformed frames are dropped with a debug log; the sender gets no
//! reply and the connection stays up.

use tokio::sync::mpsc;

use tombola_protocol::{ClientEvent, Codec, JsonCodec};
use tombola_transport::{Connection, WebSocketConnection};

use crate::engine::GameHandle;
use crate::ServerError;

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection(
    conn: WebSocketConnection,
    game: GameHandle,
    codec: JsonCodec,
) -> Result<(), ServerError> {
    let conn_id = conn.id();
    tracing::debug!(%conn_id, "handling new connection");

    let (tx, mut rx) = mpsc::unbounded_channel();
    game.attach(conn_id, tx).await;

    // Writer: drains the engine's outbound channel into the socket.
    // Ends by itself once the engine drops the sender on detach.
    let writer_conn = conn.clone();
    let writer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let frame = match codec.encode(&event) {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::error!(%conn_id, error = %e, "failed to encode event");
                    continue;
                }
            };
            if writer_conn.send(&frame).await.is_err() {
                break;
            }
        }
    });

    loop {
        match conn.recv().await {
            Ok(Some(frame)) => match codec.decode::<ClientEvent>(&frame) {
                Ok(event) => game.event(conn_id, event).await,
                Err(e) => {
                    tracing::debug!(%conn_id, error = %e, "dropping malformed frame");
                }
            },
            Ok(None) => {
                tracing::debug!(%conn_id, "connection closed cleanly");
                break;
            }
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "recv error");
                break;
            }
        }
    }

    game.detach(conn_id).await;
    let _ = writer.await;
    Ok(())
}
