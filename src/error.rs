// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 500, raised before the server starts
    Config(String),

    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    AuthError(String),

    // 404 Not Found
    NotFound(String),

    // 502 Bad Gateway: the test-data API or the model endpoint failed
    Upstream(String),

    // 502 Bad Gateway: the model answered but the reply was unusable
    TutorReply(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InternalServerError(msg) => write!(f, "internal error: {}", msg),
            AppError::Config(msg) => write!(f, "configuration error: {}", msg),
            AppError::BadRequest(msg) => write!(f, "bad request: {}", msg),
            AppError::AuthError(msg) => write!(f, "unauthorized: {}", msg),
            AppError::NotFound(msg) => write!(f, "not found: {}", msg),
            AppError::Upstream(msg) => write!(f, "upstream failure: {}", msg),
            AppError::TutorReply(msg) => write!(f, "unusable tutor reply: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// The text shown to the caller. Internal details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            AppError::InternalServerError(_) | AppError::Config(_) => {
                "Internal Server Error".to_string()
            }
            AppError::BadRequest(msg)
            | AppError::AuthError(msg)
            | AppError::NotFound(msg)
            | AppError::Upstream(msg) => msg.clone(),
            AppError::TutorReply(_) => {
                "The tutor's reply could not be understood. Please try again.".to_string()
            }
        }
    }
}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InternalServerError(msg) | AppError::Config(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::AuthError(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(msg) => {
                tracing::warn!("Upstream failure: {}", msg);
                StatusCode::BAD_GATEWAY
            }
            AppError::TutorReply(msg) => {
                tracing::warn!("Unusable tutor reply: {}", msg);
                StatusCode::BAD_GATEWAY
            }
        };
        let body = Json(json!({
            "error": self.user_message(),
        }));

        (status, body).into_response()
    }
}

/// Transport failures talking to a collaborator surface as `Upstream`.
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Upstream(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::BadRequest(err.to_string())
    }
}
