//! Mapping of game service errors onto HTTP responses.

use axum::{
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use connect4::{GameError, ServiceError, wire::ErrorResponse};
use serde::de::DeserializeOwned;

/// Error returned by every `/connect4` handler.
#[derive(Debug)]
pub enum ApiError {
    Service(ServiceError),
    /// The request body was missing, not JSON, or lacked a field.
    InvalidRequest(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Service(ServiceError::Game(
                GameError::InvalidColumn { .. } | GameError::InvalidPlayerId,
            ))
            | Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Service(ServiceError::Game(_)) => StatusCode::CONFLICT,
            Self::Service(ServiceError::Closed) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Service(ServiceError::Game(error)) => error.code(),
            Self::Service(ServiceError::Closed) => "service_closed",
            Self::InvalidRequest(_) => "invalid_request",
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Service(error) => error.to_string(),
            Self::InvalidRequest(detail) => format!("Invalid request body: {detail}"),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(error: ServiceError) -> Self {
        Self::Service(error)
    }
}

impl From<GameError> for ApiError {
    fn from(error: GameError) -> Self {
        Self::Service(error.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.message(),
            code: self.code().to_string(),
            success: false,
        };
        (self.status_code(), Json(body)).into_response()
    }
}

/// JSON body extractor whose rejections use the `{error, code, success}`
/// shape instead of axum's plain-text default.
#[derive(Debug)]
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
