//! Game actor message types.

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::game::{
    GameError,
    entities::{BoardView, GameStatus, Mark, PlayerId, TurnOutcome},
};

/// Messages that can be sent to a GameActor
#[derive(Debug)]
pub enum GameMessage {
    /// Register a player and assign the next mark
    Register {
        player_id: PlayerId,
        response: oneshot::Sender<Result<Mark, GameError>>,
    },

    /// Drop the player's mark into a column
    TakeTurn {
        player_id: PlayerId,
        column: i64,
        response: oneshot::Sender<Result<TurnOutcome, GameError>>,
    },

    /// Stop the actor
    Close { response: oneshot::Sender<()> },
}

/// Everything a reader needs, captured between two mutations.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub status: GameStatus,
    pub board: BoardView,
}
