//! API error type with JSON bodies and HTTP status mapping.
//!
//! Every error renders as `{"error": <message>}`; the status code tracks
//! the error class: validation and duplicate-phone are the caller's to
//! fix (400), a missing contact is 404, anything else is 500 and logged.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use phonedir_core::StoreError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Request rejected before any store call (400).
    #[error("{0}")]
    Validation(String),

    /// Phone collides with an existing contact (400).
    #[error("Phone number already exists")]
    DuplicatePhone,

    /// No contact with the requested id (404).
    #[error("Contact not found")]
    NotFound,

    /// Unexpected store failure (500, logged).
    #[error("{0}")]
    Store(StoreError),

    /// CSV rendering failed (500, logged).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicatePhone { .. } => Self::DuplicatePhone,
            StoreError::NotFound { .. } => Self::NotFound,
            other => Self::Store(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) | Self::DuplicatePhone => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Store(err) => {
                tracing::error!("store error: {err}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Csv(err) => {
                tracing::error!("csv export error: {err}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
