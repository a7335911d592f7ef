//! API error types with IntoResponse
//!
//! Errors become plain-text responses. Storage failures are logged here and
//! answered with a generic message; the driver's text never reaches the
//! client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::db::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Request body did not decode into a motor record (400)
    InvalidBody(serde_json::Error),

    /// Lookup parameters unusable (400)
    Validation(ValidationError),

    /// Lookup matched nothing (404)
    NotFound { resource: &'static str },

    /// Storage call failed (500, logged)
    Database {
        action: &'static str,
        source: DbError,
    },
}

impl ApiError {
    pub fn database(action: &'static str) -> impl FnOnce(DbError) -> Self {
        move |source| Self::Database { action, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidBody(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::InvalidBody(e) => {
                tracing::debug!(error = %e, "Rejected request body");
                "Invalid input".to_string()
            }
            Self::Validation(e) => e.to_string(),
            Self::NotFound { resource } => format!("No {} found", resource),
            Self::Database { action, source } => {
                // Log the actual error, return generic message
                tracing::error!(error = %source, "Database error while {}", action);
                format!("Error {}", action)
            }
        };

        (status, message).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}
