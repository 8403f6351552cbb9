//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of the portal's vocabulary:
//! - Common error types and result aliases
//! - Typed identifiers for admins and student results
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across the auth and results crates.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
#[cfg(feature = "axum")]
pub mod extract;
pub mod id;
