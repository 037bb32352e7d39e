//! Error types for Mangateca server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uuid::Uuid;

use crate::api::envelope::ApiResponse;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal failure reported to the client under an operation-specific message
    #[error("{message}: {detail}")]
    Internal { message: String, detail: String },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Authentication(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Name the failed operation for the client. Only internal failures are rewritten.
    pub fn during(self, operation: &str) -> AppError {
        match self {
            AppError::Database(e) => AppError::Internal {
                message: operation.to_string(),
                detail: format!("{:?}", e),
            },
            other => other,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            AppError::Authentication(msg) => ApiResponse::failure("No autorizado", Some(msg)),
            AppError::NotFound(msg)
            | AppError::Validation(msg)
            | AppError::BadRequest(msg)
            | AppError::Conflict(msg) => ApiResponse::failure(msg, None),
            AppError::Database(e) => {
                let reference = Uuid::new_v4();
                tracing::error!(%reference, "Database error: {:?}", e);
                ApiResponse::failure(
                    "Error interno del servidor",
                    Some(format!("Referencia: {}", reference)),
                )
            }
            AppError::Internal { message, detail } => {
                let reference = Uuid::new_v4();
                tracing::error!(%reference, "{}: {}", message, detail);
                ApiResponse::failure(message, Some(format!("Referencia: {}", reference)))
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
