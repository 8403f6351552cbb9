//! Signed Tokens (HS256)
//!
//! Compact `header.claims.signature` tokens, each segment URL-safe base64.
//! The codec is claim-agnostic: callers bring their own serde type and
//! check time-based claims themselves.

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::crypto::{from_base64url, hmac_sha256, to_base64url, verify_hmac_sha256};

/// Fixed JOSE header, pre-serialized so encoding is deterministic
const HEADER_JSON: &str = r#"{"alg":"HS256","typ":"JWT"}"#;

/// Token decoding errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token")]
    Malformed,

    #[error("Unsupported token algorithm")]
    UnsupportedAlgorithm,

    #[error("Invalid token signature")]
    BadSignature,

    #[error("Invalid token claims")]
    InvalidClaims,

    #[error("Failed to encode token claims")]
    Encoding,
}

#[derive(serde::Deserialize)]
struct Header {
    alg: String,
}

/// Sign `claims` with HMAC-SHA256
pub fn encode<C: Serialize>(claims: &C, secret: &[u8]) -> Result<String, TokenError> {
    let claims_json = serde_json::to_vec(claims).map_err(|_| TokenError::Encoding)?;
    let signing_input = format!(
        "{}.{}",
        to_base64url(HEADER_JSON.as_bytes()),
        to_base64url(&claims_json)
    );
    let signature = hmac_sha256(secret, signing_input.as_bytes());
    Ok(format!("{}.{}", signing_input, to_base64url(&signature)))
}

/// Verify the signature and decode the claims
///
/// The signature is checked before the claims are parsed.
pub fn decode<C: DeserializeOwned>(token: &str, secret: &[u8]) -> Result<C, TokenError> {
    let mut parts = token.split('.');
    let (Some(header_b64), Some(claims_b64), Some(signature_b64), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(TokenError::Malformed);
    };

    let header_bytes = from_base64url(header_b64).map_err(|_| TokenError::Malformed)?;
    let header: Header =
        serde_json::from_slice(&header_bytes).map_err(|_| TokenError::Malformed)?;
    if header.alg != "HS256" {
        return Err(TokenError::UnsupportedAlgorithm);
    }

    let signature = from_base64url(signature_b64).map_err(|_| TokenError::Malformed)?;
    let signing_input_len = header_b64.len() + 1 + claims_b64.len();
    let signing_input = &token[..signing_input_len];
    if !verify_hmac_sha256(secret, signing_input.as_bytes(), &signature) {
        return Err(TokenError::BadSignature);
    }

    let claims_bytes = from_base64url(claims_b64).map_err(|_| TokenError::Malformed)?;
    serde_json::from_slice(&claims_bytes).map_err(|_| TokenError::InvalidClaims)
}
