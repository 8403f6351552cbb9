//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Admin account, session claims, repository traits
//! - `application/` - Registration, login, token verification
//! - `infra/` - PostgreSQL and in-memory Credential Stores
//! - `presentation/` - HTTP handlers, DTOs, router, Token Guard middleware
//!
//! ## Features
//! - Admin registration with email + password
//! - Login throttled by consecutive failures per email
//! - Stateless HS256 session tokens (1 hour)
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B compliant)
//! - Failed attempts counted per normalized email; throttled attempts do
//!   not touch the Credential Store
//! - Tokens carry only the admin id; expiry is the only revocation

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::{AuthConfig, TokenGuard};
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryAdminRepository, PgAdminRepository};
pub use presentation::middleware::{AuthenticatedAdmin, require_admin_token};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
