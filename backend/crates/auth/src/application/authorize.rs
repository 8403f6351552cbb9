//! Token Guard
//!
//! Stateless verification of bearer session tokens.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::AdminId;

use crate::application::config::AuthConfig;
use crate::domain::entity::session::SessionClaims;
use crate::error::{AuthError, AuthResult};

/// Verifies session tokens issued by [`LoginUseCase`](super::LoginUseCase)
#[derive(Clone)]
pub struct TokenGuard {
    config: Arc<AuthConfig>,
}

impl TokenGuard {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    /// Resolve a bearer token to the admin it was issued to
    ///
    /// - no token: `Unauthorized`
    /// - bad structure, signature, algorithm or expiry: `Forbidden`
    pub fn authorize(&self, token: Option<&str>) -> AuthResult<AdminId> {
        let token = token.ok_or(AuthError::Unauthorized)?;

        let claims: SessionClaims = platform::token::decode(token, &self.config.token_secret)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token rejected");
                AuthError::Forbidden
            })?;

        if claims.is_expired(Utc::now()) {
            tracing::debug!(admin_id = %claims.admin_id, "Token expired");
            return Err(AuthError::Forbidden);
        }

        Ok(claims.admin_id())
    }
}
