//! Application error types and their HTTP rendering.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// A single field violation reported by the validation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed ({} field errors)", .0.len())]
    ValidationFailed(Vec<FieldError>),

    #[error("User already exists")]
    Conflict,

    #[error("No user with the given email")]
    UserNotFound,

    #[error("Password does not match")]
    InvalidCredentials,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict => StatusCode::CONFLICT,
            AppError::UserNotFound | AppError::InvalidCredentials | AppError::InvalidToken(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Db(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::ValidationFailed(details) => json!({
                "error": "Validation failed",
                "details": details,
            }),
            AppError::Conflict => json!({ "error": "User already exists" }),
            // Not-found and wrong-password must look the same to the client.
            AppError::UserNotFound | AppError::InvalidCredentials => {
                json!({ "error": "Invalid credentials" })
            }
            AppError::InvalidToken(_) => json!({ "error": "Invalid token" }),
            AppError::Db(_) | AppError::Internal(_) => {
                tracing::error!(error = %self, "request failed");
                json!({ "error": "Internal server error" })
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
