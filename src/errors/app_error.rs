use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::core::session::SessionError;

/// Errors surfaced at the HTTP boundary.
///
/// Every variant renders as `{"error": "<message>"}`; messages never carry
/// the provider secret or a backtrace.
#[derive(Debug, Error)]
pub enum AppError {
    /// Required server configuration is missing
    #[error("{0}")]
    Configuration(String),

    /// The request body could not be understood
    #[error("Invalid request body: {0}")]
    BadRequest(String),

    /// Session creation failed upstream or in transit
    #[error(transparent)]
    Session(#[from] SessionError),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Configuration(_) | AppError::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %message, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %message, "Request rejected");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}
