//! Error types for the Book API server

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mongodb::bson::oid;
use serde::Serialize;
use thiserror::Error;

/// Message returned for every 5xx; internal details stay in the logs
pub const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Caller input failed validation; `errors` lists every offending field
    #[error("Validation error: {message}")]
    Validation { message: String, errors: Vec<String> },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Invalid book id: {0}")]
    InvalidId(#[from] oid::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation {
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::InvalidId(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (message, errors) = match self {
            AppError::Validation { message, errors } => (message, errors),
            AppError::NotFound(msg) => (msg, Vec::new()),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (INTERNAL_ERROR_MESSAGE.to_string(), Vec::new())
            }
            AppError::InvalidId(e) => {
                tracing::error!("Malformed book id: {}", e);
                (INTERNAL_ERROR_MESSAGE.to_string(), Vec::new())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (INTERNAL_ERROR_MESSAGE.to_string(), Vec::new())
            }
        };

        let body = Json(ErrorResponse {
            success: false,
            message,
            errors,
        });

        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation {
            message: "Invalid request body.".to_string(),
            errors: vec![rejection.body_text()],
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation {
            message: "Validation failed!".to_string(),
            errors: vec![rejection.body_text()],
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
