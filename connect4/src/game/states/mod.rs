//! Phase markers for the Connect4 FSM.
//!
//! Each state represents a specific phase of the game lifecycle.

use crate::game::entities::Outcome;

/// Waiting for the second player to register.
#[derive(Debug, Default)]
pub struct Lobby {}

impl Lobby {
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }
}

/// Both players registered; the active player may drop a mark.
#[derive(Debug)]
pub struct TakeTurn {}

/// Terminal phase. Nothing changes after this.
#[derive(Clone, Copy, Debug)]
pub struct GameOver {
    pub outcome: Outcome,
}
