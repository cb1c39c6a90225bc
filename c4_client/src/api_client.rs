//! HTTP API client for the Connect4 server.

use anyhow::{Context, Result};
use connect4::{
    entities::{BoardView, GameStatus, Mark, PlayerId},
    wire::{
        BoardResponse, ErrorResponse, MoveRequest, MoveResponse, RegisterRequest,
        RegisterResponse,
    },
};
use std::fmt;

/// The server answered with an error status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRejected {
    pub status: u16,
    /// Stable error code (e.g. `column_full`), empty if the body had none.
    pub code: String,
    pub error: String,
}

impl RequestRejected {
    /// The column could not be played, but another one might be.
    pub fn is_unplayable_column(&self) -> bool {
        matches!(self.code.as_str(), "invalid_column" | "column_full")
    }
}

impl fmt::Display for RequestRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.code.is_empty() {
            write!(f, "server returned {}: {}", self.status, self.error)
        } else {
            write!(f, "server returned {} ({}): {}", self.status, self.code, self.error)
        }
    }
}

impl std::error::Error for RequestRejected {}

/// API client for communicating with the game server
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Register a player and return the assigned mark
    pub async fn register(&self, player_id: &PlayerId) -> Result<Mark> {
        let request = RegisterRequest {
            player_id: player_id.clone(),
        };

        let response = self
            .client
            .post(format!("{}/connect4/register", self.base_url))
            .json(&request)
            .send()
            .await
            .context("Failed to send register request")?;

        let response: RegisterResponse = Self::parse(response)
            .await
            .context("Registration failed")?;
        Ok(response.player_icon)
    }

    /// Fetch the current game status
    pub async fn status(&self) -> Result<GameStatus> {
        let response = self
            .client
            .get(format!("{}/connect4/status", self.base_url))
            .send()
            .await
            .context("Failed to send status request")?;

        Self::parse(response).await.context("Status request failed")
    }

    /// Fetch the flattened board
    pub async fn board(&self) -> Result<BoardView> {
        let response = self
            .client
            .get(format!("{}/connect4/board", self.base_url))
            .send()
            .await
            .context("Failed to send board request")?;

        let response: BoardResponse = Self::parse(response)
            .await
            .context("Board request failed")?;
        Ok(response.board)
    }

    /// Submit a 0-based column. A refused move is returned as a
    /// [`RequestRejected`] inside the error chain.
    pub async fn check_move(&self, player_id: &PlayerId, column: i64) -> Result<()> {
        let request = MoveRequest {
            player_id: player_id.clone(),
            column,
        };

        let response = self
            .client
            .post(format!("{}/connect4/check_move", self.base_url))
            .json(&request)
            .send()
            .await
            .context("Failed to send move request")?;

        let response: MoveResponse = Self::parse(response).await?;
        if !response.success {
            anyhow::bail!("Server did not accept column {}", column);
        }
        Ok(())
    }

    async fn parse<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|e| format!("Failed to read error response: {}", e));
            let rejected = match serde_json::from_str::<ErrorResponse>(&text) {
                Ok(body) => RequestRejected {
                    status: status.as_u16(),
                    code: body.code,
                    error: body.error,
                },
                Err(_) => RequestRejected {
                    status: status.as_u16(),
                    code: String::new(),
                    error: text,
                },
            };
            return Err(rejected.into());
        }

        response
            .json()
            .await
            .context("Failed to parse server response")
    }
}
