//! Results Error Types
//!
//! This module provides results-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::{AppError, FieldViolation};
use kernel::error::conversions::database_error_kind;
use kernel::error::kind::ErrorKind;
use thiserror::Error;

/// Results-specific result type alias
pub type ResultsResult<T> = Result<T, ResultError>;

/// Results-specific error variants
#[derive(Debug, Error)]
pub enum ResultError {
    /// Lookup without a name or roll number
    #[error("Student name and roll number are required")]
    MissingFields,

    /// Submission failed validation; one entry per offending field
    #[error("Result payload is invalid")]
    Validation(Vec<FieldViolation>),

    /// A record for the same (roll number, semester) already exists
    #[error("Result already exists for this student and semester.")]
    DuplicateResult,

    /// No record for the id or the (name, roll number) pair
    #[error("Student not found")]
    NotFound,

    /// The rendering engine failed
    #[error("Rendering failed: {0}")]
    Rendering(String),

    /// The rendering engine did not answer in time
    #[error("Rendering timed out after {0:?}")]
    RenderTimeout(Duration),

    /// Document storage failed
    #[error("Document storage failed: {0}")]
    Storage(#[from] std::io::Error),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResultError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResultError::MissingFields | ResultError::Validation(_) => ErrorKind::BadRequest,
            ResultError::DuplicateResult => ErrorKind::Conflict,
            ResultError::NotFound => ErrorKind::NotFound,
            ResultError::Database(e) => database_error_kind(e),
            ResultError::Rendering(_)
            | ResultError::RenderTimeout(_)
            | ResultError::Storage(_)
            | ResultError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Infrastructure failures collapse to an opaque message.
    pub fn to_app_error(&self) -> AppError {
        let kind = self.kind();
        if kind.is_server_error() {
            return AppError::new(kind, "Internal server error");
        }
        match self {
            ResultError::Validation(violations) => AppError::new(kind, self.to_string())
                .with_violations(violations.clone())
                .with_action("Correct the listed fields and submit again"),
            _ => AppError::new(kind, self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            ResultError::Database(e) => {
                tracing::error!(error = %e, "Results database error");
            }
            ResultError::Rendering(msg) => {
                tracing::error!(message = %msg, "Document rendering failed");
            }
            ResultError::RenderTimeout(after) => {
                tracing::error!(timeout = ?after, "Document rendering timed out");
            }
            ResultError::Storage(e) => {
                tracing::error!(error = %e, "Document storage failed");
            }
            ResultError::Internal(msg) => {
                tracing::error!(message = %msg, "Results internal error");
            }
            ResultError::DuplicateResult => {
                tracing::warn!("Duplicate result submission");
            }
            _ => {
                tracing::debug!(error = %self, "Results error");
            }
        }
    }
}

impl IntoResponse for ResultError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
