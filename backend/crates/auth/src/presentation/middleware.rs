//! Auth Middleware
//!
//! Token Guard for protected routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use kernel::id::AdminId;
use platform::bearer::extract_bearer;

use crate::application::TokenGuard;
use crate::error::AuthError;

/// Admin resolved from the bearer token, stored in request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedAdmin {
    pub admin_id: AdminId,
}

/// Middleware that requires a valid session token
///
/// Use with `axum::middleware::from_fn_with_state(guard, require_admin_token)`.
pub async fn require_admin_token(
    State(guard): State<TokenGuard>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = extract_bearer(req.headers());
    let admin_id = guard.authorize(token.as_deref())?;

    req.extensions_mut().insert(AuthenticatedAdmin { admin_id });

    Ok(next.run(req).await)
}
