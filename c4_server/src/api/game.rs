//! `/connect4` handlers.
//!
//! Mutations go through the game actor one at a time; `status` and `board`
//! read the latest published snapshot and never wait behind a move.
//!
//! # Examples
//!
//! ```bash
//! curl -X POST http://localhost:5000/connect4/register \
//!   -H "Content-Type: application/json" \
//!   -d '{"player_id": "alice"}'
//!
//! curl -X POST http://localhost:5000/connect4/check_move \
//!   -H "Content-Type: application/json" \
//!   -d '{"player_id": "alice", "column": 3}'
//! ```

use axum::{Json, extract::State};
use connect4::{
    entities::{GameStatus, Mark, Outcome},
    wire::{BoardResponse, MoveRequest, MoveResponse, RegisterRequest, RegisterResponse},
};

use super::{
    AppState,
    error::{ApiError, Payload},
    request_id::RequestId,
};
use crate::metrics;

/// Register a player and return the assigned mark.
///
/// # Errors
///
/// - `400 Bad Request`: empty, over-long or padded player id, or a
///   malformed body
/// - `409 Conflict`: id already registered, or two players already joined
pub async fn register(
    State(state): State<AppState>,
    request_id: RequestId,
    Payload(request): Payload<RegisterRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    match state.game.register(request.player_id.clone()).await {
        Ok(mark) => {
            metrics::registrations_total("ok");
            tracing::info!(
                request_id = %request_id.as_str(),
                player_id = %request.player_id,
                mark = %mark,
                "Player registered"
            );
            Ok(Json(RegisterResponse { player_icon: mark }))
        }
        Err(e) => {
            let error = ApiError::from(e);
            metrics::registrations_total(error.code());
            Err(error)
        }
    }
}

/// Current status snapshot. Always succeeds.
pub async fn status(State(state): State<AppState>) -> Json<GameStatus> {
    Json(state.game.status())
}

/// Flattened, row-major board snapshot. Always succeeds.
pub async fn board(State(state): State<AppState>) -> Json<BoardResponse> {
    Json(BoardResponse {
        board: state.game.board(),
    })
}

/// Drop the player's mark into a 0-based column.
///
/// # Errors
///
/// - `400 Bad Request`: column out of range, or a malformed body
/// - `409 Conflict`: not this player's turn, column full, game over, or
///   the opponent has not registered yet
pub async fn check_move(
    State(state): State<AppState>,
    request_id: RequestId,
    Payload(request): Payload<MoveRequest>,
) -> Result<Json<MoveResponse>, ApiError> {
    match state
        .game
        .take_turn(&request.player_id, request.column)
        .await
    {
        Ok(turn) => {
            metrics::moves_total("ok");
            tracing::info!(
                request_id = %request_id.as_str(),
                player_id = %request.player_id,
                column = turn.column,
                row = turn.row,
                turn_number = turn.turn_number,
                "Move accepted"
            );

            if let Some(outcome) = turn.outcome {
                metrics::games_finished_total(outcome_label(outcome));
                tracing::info!(request_id = %request_id.as_str(), %outcome, "Game finished");
            }

            Ok(Json(MoveResponse { success: true }))
        }
        Err(e) => {
            let error = ApiError::from(e);
            metrics::moves_total(error.code());
            tracing::debug!(
                request_id = %request_id.as_str(),
                player_id = %request.player_id,
                column = request.column,
                code = error.code(),
                "Move rejected"
            );
            Err(error)
        }
    }
}

fn outcome_label(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Winner(Mark::X) => "x",
        Outcome::Winner(Mark::O) => "o",
        Outcome::Draw => "draw",
    }
}
