use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use arthra_export::error::{AggregateError, ExportError};
use arthra_scoring::ScoringError;
use arthra_storage::error::StorageError;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    /// A write lost too many optimistic-lock races; the client may retry.
    Conflict(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::PatientNotFound { .. } => {
                ApiError::NotFound("Patient not found".to_string())
            }
            e @ StorageError::AppendConflict { .. } => ApiError::Conflict(e.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<ScoringError> for ApiError {
    fn from(e: ScoringError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<AggregateError> for ApiError {
    fn from(e: AggregateError) -> Self {
        match e {
            AggregateError::PatientNotFound(_) => {
                ApiError::NotFound("Patient not found".to_string())
            }
            AggregateError::Storage(inner) => inner.into(),
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(e: ExportError) -> Self {
        match e {
            ExportError::Aggregate(inner) => inner.into(),
            ExportError::UnknownFormat(format) => {
                ApiError::BadRequest(format!("unknown export format: {format}"))
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<arthra_core::error::CoreError> for ApiError {
    fn from(e: arthra_core::error::CoreError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}
