//! Bearer Token Extraction
//!
//! `Authorization: Bearer <token>` parsing via typed headers.

use axum::http::HeaderMap;
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};

/// Extract the bearer token from request headers
///
/// Returns `None` when the header is absent, uses another scheme,
/// or carries an empty token.
pub fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let Authorization(bearer) = headers.typed_get::<Authorization<Bearer>>()?;
    let token = bearer.token().trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
