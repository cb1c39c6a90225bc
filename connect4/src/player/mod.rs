//! Player front ends and the loop that drives them.
//!
//! Every way of taking part in a game (in-process, over HTTP, on attached
//! hardware) implements the same [`Player`] capability set. The engine and
//! the service never know which implementation is on the other side.

pub mod columns;
pub mod coordinator;
pub mod local;

pub use columns::{ColumnSource, ScriptedColumns};
pub use coordinator::{Coordinator, DEFAULT_POLL_INTERVAL};
pub use local::LocalPlayer;

use anyhow::Result;
use async_trait::async_trait;

use crate::game::entities::{GameStatus, Mark, PlayerId};

/// What a coordinator needs from a participant.
#[async_trait]
pub trait Player: Send + Sync {
    fn id(&self) -> &PlayerId;

    /// Assigned mark, once registered.
    fn mark(&self) -> Option<Mark>;

    /// Join the game and remember the assigned mark.
    async fn register(&mut self) -> Result<Mark>;

    async fn status(&self) -> Result<GameStatus>;

    /// Show the current board to whoever is behind this player.
    async fn visualize(&self) -> Result<()>;

    /// Obtain a column and submit it until the game accepts one. Returns the
    /// 0-based column that was played.
    async fn submit_move(&mut self) -> Result<usize>;

    async fn celebrate(&self);
}
