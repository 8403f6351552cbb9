//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::conversions::database_error_kind;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::throttle::ThrottleStoreError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email or password absent or blank
    #[error("Email and password are required")]
    MissingFields,

    /// Email failed format validation
    #[error("{0}")]
    InvalidEmail(String),

    /// Password rejected by the policy
    #[error("{0}")]
    PasswordValidation(String),

    /// Registration for an email that already has an account
    #[error("Admin already exists")]
    AdminExists,

    /// Unknown email or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Failure counter reached the limit
    #[error("Too many failed attempts. Try again later.")]
    TooManyAttempts,

    /// No bearer token on a protected request
    #[error("Authentication token required")]
    Unauthorized,

    /// Bearer token malformed, badly signed or expired
    #[error("Invalid or expired token")]
    Forbidden,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Failure counter backend error
    #[error("Throttle store error: {0}")]
    Throttle(#[from] ThrottleStoreError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::MissingFields
            | AuthError::InvalidEmail(_)
            | AuthError::PasswordValidation(_) => ErrorKind::BadRequest,
            AuthError::AdminExists => ErrorKind::Conflict,
            AuthError::InvalidCredentials | AuthError::Unauthorized => ErrorKind::Unauthorized,
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::TooManyAttempts => ErrorKind::TooManyRequests,
            AuthError::Database(e) => database_error_kind(e),
            AuthError::Throttle(_) => ErrorKind::ServiceUnavailable,
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Server-side failures keep their detail out of the response body.
    pub fn to_app_error(&self) -> AppError {
        let kind = self.kind();
        if kind.is_server_error() {
            return AppError::new(kind, "Internal server error");
        }
        let err = AppError::new(kind, self.to_string());
        match self {
            AuthError::TooManyAttempts => {
                err.with_action("Wait before trying again or contact an administrator")
            }
            AuthError::Forbidden => err.with_action("Log in again to obtain a new token"),
            _ => err,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Throttle(e) => {
                tracing::error!(error = %e, "Throttle store error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::TooManyAttempts => {
                tracing::warn!("Login attempt while throttled");
            }
            AuthError::Forbidden => {
                tracing::warn!("Rejected invalid or expired token");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AuthError::MissingFields.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::AdminExists.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::TooManyAttempts.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(AuthError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            AuthError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_server_errors_are_opaque() {
        let err = AuthError::Internal("argon2 exploded at 0xdeadbeef".into());
        let app = err.to_app_error();
        assert_eq!(app.message(), "Internal server error");
    }

    #[test]
    fn test_client_errors_keep_message() {
        let app = AuthError::AdminExists.to_app_error();
        assert_eq!(app.message(), "Admin already exists");
    }
}
