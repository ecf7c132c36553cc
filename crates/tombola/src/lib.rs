//! # Tombola
//!
//! Server for a live multi-party Tombola session: one administrator
//! drives a shared draw sequence, many players hold pre-assigned card
//! sets and race to declare wins.
//!
//! The crate ties the layers together: transport → protocol → engine →
//! game. Every inbound event funnels through a single engine task that
//! owns the [`GameCoordinator`](tombola_game::GameCoordinator), so game
//! state is mutated strictly one event at a time.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tombola::TombolaServer;
//! use tombola_deck::Deck;
//!
//! # async fn run() -> Result<(), tombola::ServerError> {
//! let deck = Deck::from_bytes(&std::fs::read("assets/cartelle.tsv")?)?;
//! let server = TombolaServer::builder()
//!     .bind("0.0.0.0:3000")
//!     .build(deck)
//!     .await?;
//! server.run().await
//! # }
//! ```

mod engine;
mod error;
mod handler;
mod server;

pub use engine::{EventSender, GameHandle};
pub use error::ServerError;
pub use server::{TombolaServer, TombolaServerBuilder};
