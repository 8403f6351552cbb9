//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, HMAC, Base64, hex digests)
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - Signed, time-limited bearer tokens (HS256)
//! - Request header helpers (bearer token, client IP)
//! - Failed-attempt counters for login throttling

pub mod bearer;
pub mod client;
pub mod crypto;
pub mod password;
pub mod throttle;
pub mod token;
