//! `TombolaServer` builder and accept loop.
//!
//! Entry point for running the server: bind the transport, spawn the
//! engine over a validated deck, then hand each accepted connection to
//! its own handler task.

use std::sync::Arc;

use tombola_deck::Deck;
use tombola_protocol::JsonCodec;
use tombola_transport::{Transport, WebSocketTransport};

use crate::engine::{spawn_engine, GameHandle};
use crate::handler::handle_connection;
use crate::ServerError;

/// Builder for configuring and starting a Tombola server.
pub struct TombolaServerBuilder {
    bind_addr: String,
}

impl TombolaServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Binds the transport and starts the engine over `deck`.
    ///
    /// The deck is already validated by construction; a corrupt source
    /// never gets this far.
    pub async fn build(self, deck: Deck) -> Result<TombolaServer, ServerError> {
        let transport = WebSocketTransport::bind(&self.bind_addr).await?;
        let game = spawn_engine(Arc::new(deck));
        Ok(TombolaServer { transport, game })
    }
}

impl Default for TombolaServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running Tombola server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct TombolaServer {
    transport: WebSocketTransport,
    game: GameHandle,
}

impl TombolaServer {
    /// Creates a new builder.
    pub fn builder() -> TombolaServerBuilder {
        TombolaServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }

    /// Runs the accept loop: one handler task per connection, until the
    /// process is terminated.
    pub async fn run(mut self) -> Result<(), ServerError> {
        tracing::info!("tombola server running");

        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    let game = self.game.clone();
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(conn, game, JsonCodec).await {
                            tracing::debug!(error = %e, "connection ended with error");
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
