//! Auth Router

use axum::{Router, routing::post};
use platform::throttle::{FailureCounterStore, InMemoryFailureCounter};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::AdminRepository;
use crate::infra::postgres::PgAdminRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with PostgreSQL repository and a process-local
/// failure counter
pub fn auth_router(repo: PgAdminRepository, config: AuthConfig) -> Router {
    let throttle = InMemoryFailureCounter::new(config.lockout_window);
    auth_router_generic(repo, throttle, config)
}

/// Create a generic Auth router for any repository and counter implementation
pub fn auth_router_generic<R, F>(repo: R, throttle: F, config: AuthConfig) -> Router
where
    R: AdminRepository + Send + Sync + 'static,
    F: FailureCounterStore + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        throttle: Arc::new(throttle),
        config: Arc::new(config),
    };

    Router::new()
        .route("/register", post(handlers::register::<R, F>))
        .route("/login", post(handlers::login::<R, F>))
        .with_state(state)
}
