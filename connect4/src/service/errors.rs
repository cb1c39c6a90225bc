//! Game service error types.

use thiserror::Error;

use crate::game::GameError;

/// Errors returned through a [`GameHandle`](super::GameHandle).
#[derive(Debug, Error, PartialEq)]
pub enum ServiceError {
    /// The engine rejected the request
    #[error(transparent)]
    Game(#[from] GameError),

    /// The actor has stopped and no longer accepts requests
    #[error("game service is closed")]
    Closed,
}

impl ServiceError {
    /// The engine error, if this is one.
    pub fn game_error(&self) -> Option<&GameError> {
        match self {
            Self::Game(error) => Some(error),
            Self::Closed => None,
        }
    }
}

/// Result type for game service operations
pub type Result<T> = std::result::Result<T, ServiceError>;
