//! HTTP API for the Connect4 game server.
//!
//! Remote players poll `status` until it is their turn, then submit a move.
//! The server never pushes.
//!
//! # Endpoints
//!
//! ```text
//! GET  /                      - Welcome text
//! GET  /health                - Server health status
//! POST /connect4/register     - {player_id} -> {player_icon}
//! GET  /connect4/status       - {active_player, active_icon, winner, draw, turn_number, registered_players}
//! GET  /connect4/board        - {board: [" ", "X", "O", ...]}
//! POST /connect4/check_move   - {player_id, column} -> {success}
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use c4_server::api::{AppState, create_router};
//! use connect4::{GameActor, GameConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let state = AppState {
//!     game: GameActor::spawn(&GameConfig::default()),
//! };
//! let app = create_router(state);
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:5000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod game;
pub mod request_id;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use connect4::GameHandle;
use serde_json::json;
use tower_http::cors::CorsLayer;

pub use error::ApiError;

/// Application state shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub game: GameHandle,
}

/// Create the API router with all endpoints and middleware.
pub fn create_router(state: AppState) -> Router {
    let game_routes = Router::new()
        .route("/register", post(game::register))
        .route("/status", get(game::status))
        .route("/board", get(game::board))
        .route("/check_move", post(game::check_move));

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .nest("/connect4", game_routes)
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn index() -> &'static str {
    "Welcome to the Connect4 game server!"
}

/// Health check endpoint for monitoring and load balancers.
///
/// Returns `200 OK` while the game service accepts requests, or
/// `503 Service Unavailable` once it has shut down.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let healthy = !state.game.is_closed();
    let status = state.game.status();

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = json!({
        "status": if healthy { "healthy" } else { "unhealthy" },
        "version": env!("CARGO_PKG_VERSION"),
        "game": {
            "registered_players": status.registered_players,
            "turn_number": status.turn_number,
            "over": status.is_over(),
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (status_code, Json(response))
}
