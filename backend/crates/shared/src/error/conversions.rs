//! Error conversions - database classification and HTTP rendering
//!
//! Feature-gated glue between [`AppError`] and the crates the portal sits on.

#[allow(unused_imports)]
use super::app_error::AppError;
#[allow(unused_imports)]
use super::kind::ErrorKind;

// ============================================================================
// SQLx helpers (feature-gated)
// ============================================================================

/// PostgreSQL unique_violation
#[cfg(feature = "sqlx")]
const PG_UNIQUE_VIOLATION: &str = "23505";

/// 一意制約違反かどうか
///
/// (rollNo, semester) や admin email の重複はストレージ側の制約で検出し、
/// 各ドメインの Conflict エラーに変換します。
#[cfg(feature = "sqlx")]
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err
            .code()
            .is_some_and(|code| code.as_ref() == PG_UNIQUE_VIOLATION),
        _ => false,
    }
}

/// データベースエラーを ErrorKind に分類
///
/// 接続断・プール枯渇は 503、それ以外は 500。
#[cfg(feature = "sqlx")]
pub fn database_error_kind(err: &sqlx::Error) -> ErrorKind {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            ErrorKind::ServiceUnavailable
        }
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            // Class 53 (insufficient resources), class 57 (operator intervention)
            Some("53000" | "53100" | "53200" | "53300" | "57P01" | "57P02" | "57P03") => {
                ErrorKind::ServiceUnavailable
            }
            _ => ErrorKind::InternalServerError,
        },
        _ => ErrorKind::InternalServerError,
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(self.problem_body())).into_response()
    }
}


#[cfg(all(test, feature = "axum"))]
mod axum_tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_status_follows_kind() {
        let response = AppError::conflict("Result already exists").into_response();
        assert_eq!(response.status(), 409);

        let response = AppError::too_many_requests("slow down").into_response();
        assert_eq!(response.status(), 429);
    }
}
