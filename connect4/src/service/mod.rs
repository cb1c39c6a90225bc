//! Game service providing serialized access to one engine.
//!
//! This module implements:
//! - GameActor: async actor that owns the [`GameEngine`](crate::GameEngine)
//! - GameHandle: cloneable handle for submitting mutations and reading snapshots
//! - Message-based communication with tokio channels
//!
//! ## Architecture
//!
//! The actor runs in its own Tokio task with an mpsc inbox, so registrations
//! and moves are applied strictly one at a time. After every accepted
//! mutation it publishes a [`GameSnapshot`] on a watch channel; readers take
//! the latest snapshot without queueing behind mutations and never observe a
//! half-applied move.
//!
//! ## Example
//!
//! ```
//! use connect4::{GameActor, GameConfig, entities::PlayerId};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), connect4::ServiceError> {
//! let handle = GameActor::spawn(&GameConfig::default());
//! let alice = PlayerId::new("alice");
//! handle.register(alice.clone()).await?;
//! handle.register(PlayerId::new("bob")).await?;
//! handle.take_turn(&alice, 0).await?;
//! assert_eq!(handle.status().turn_number, 1);
//! # Ok(())
//! # }
//! ```

pub mod actor;
pub mod config;
pub mod errors;
pub mod messages;

pub use actor::{GameActor, GameHandle};
pub use config::GameConfig;
pub use errors::ServiceError;
pub use messages::{GameMessage, GameSnapshot};
