//! HTTP Handlers

use axum::Json;
use axum::extract::{ConnectInfo, State};
use axum::http::{Extensions, HeaderMap, StatusCode};
use kernel::extract::JsonBody;
use std::net::SocketAddr;
use std::sync::Arc;

use platform::client::{display_ip, extract_client_ip};
use platform::throttle::FailureCounterStore;

use crate::application::config::AuthConfig;
use crate::application::{LoginInput, LoginUseCase, RegisterAdminUseCase, RegisterInput};
use crate::domain::repository::AdminRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest};

/// Shared state for auth handlers
pub struct AuthAppState<R, F>
where
    R: AdminRepository + Send + Sync + 'static,
    F: FailureCounterStore + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub throttle: Arc<F>,
    pub config: Arc<AuthConfig>,
}

impl<R, F> Clone for AuthAppState<R, F>
where
    R: AdminRepository + Send + Sync + 'static,
    F: FailureCounterStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            throttle: self.throttle.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /register
pub async fn register<R, F>(
    State(state): State<AuthAppState<R, F>>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> AuthResult<(StatusCode, Json<MessageResponse>)>
where
    R: AdminRepository + Send + Sync + 'static,
    F: FailureCounterStore + Send + Sync + 'static,
{
    let use_case = RegisterAdminUseCase::new(state.repo.clone(), state.config.clone());

    let input = RegisterInput {
        email: req.email.unwrap_or_default(),
        password: req.password.unwrap_or_default(),
    };

    use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Admin registered")),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /login
pub async fn login<R, F>(
    State(state): State<AuthAppState<R, F>>,
    headers: HeaderMap,
    extensions: Extensions,
    JsonBody(req): JsonBody<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: AdminRepository + Send + Sync + 'static,
    F: FailureCounterStore + Send + Sync + 'static,
{
    // ConnectInfo is absent when the router is driven without a socket (tests)
    let direct_ip = extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());
    let client_ip = extract_client_ip(&headers, direct_ip);

    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.throttle.clone(),
        state.config.clone(),
    );

    let input = LoginInput {
        email: req.email.unwrap_or_default(),
        password: req.password.unwrap_or_default(),
    };

    let output = use_case.execute(input).await.inspect_err(|_| {
        tracing::debug!(client_ip = %display_ip(client_ip), "Login rejected");
    })?;

    tracing::debug!(
        admin_id = %output.admin_id,
        client_ip = %display_ip(client_ip),
        expires_at = %output.expires_at,
        "Session token issued"
    );

    Ok(Json(LoginResponse {
        token: output.token,
    }))
}
