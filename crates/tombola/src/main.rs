//! Binary entry point: load and validate the deck, then serve.

use tombola::{ServerError, TombolaServer};
use tombola_deck::Deck;
use tracing_subscriber::EnvFilter;

/// Listen address, overridable via `TOMBOLA_ADDR`.
const DEFAULT_ADDR: &str = "0.0.0.0:3000";

/// Deck source path, overridable via `TOMBOLA_DECK`.
const DEFAULT_DECK: &str = "assets/cartelle.tsv";

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr = std::env::var("TOMBOLA_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let deck_path = std::env::var("TOMBOLA_DECK").unwrap_or_else(|_| DEFAULT_DECK.to_string());

    // A corrupt deck is fatal: refuse to serve rather than run a broken
    // game.
    let deck = Deck::from_bytes(&std::fs::read(&deck_path)?)?;
    tracing::info!(path = %deck_path, "deck loaded and validated");

    let server = TombolaServer::builder().bind(&addr).build(deck).await?;
    tracing::info!(%addr, "tombola server ready");
    server.run().await
}
