//! JSON payloads of the `/connect4` REST surface, shared by the server and
//! its clients.

use serde::{Deserialize, Serialize};

use crate::game::entities::{BoardView, Mark, PlayerId};

/// `POST /connect4/register`
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RegisterRequest {
    pub player_id: PlayerId,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RegisterResponse {
    pub player_icon: Mark,
}

/// `GET /connect4/board`
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct BoardResponse {
    pub board: BoardView,
}

/// `POST /connect4/check_move`. `column` is 0-based and signed so that
/// negative values reach the engine and come back as `invalid_column`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MoveRequest {
    pub player_id: PlayerId,
    pub column: i64,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MoveResponse {
    pub success: bool,
}

/// Body of every 4xx/5xx response.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(default)]
    pub success: bool,
}
