//! Admin Password Value Object
//!
//! Domain wrapper over `platform::password`.
//!
//! - [`RawPassword`] is what the admin typed. Zeroized on drop.
//! - [`AdminPassword`] is the Argon2id PHC string kept in the Credential Store.

use platform::password::{ClearTextPassword, HashedPassword, PasswordPolicyError};
use std::fmt;

use crate::error::{AuthError, AuthResult};

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from request input
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Accept a password chosen at registration
    ///
    /// ## Validation Rules (NIST SP 800-63B)
    /// - 8 to 128 characters after NFKC normalization
    /// - No control characters
    /// - No common patterns (sequential, keyboard, dictionary)
    pub fn new(raw: String) -> AuthResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| {
            let message = match e {
                PasswordPolicyError::TooShort { min, .. } => {
                    format!("Password must be at least {min} characters")
                }
                PasswordPolicyError::TooLong { max, .. } => {
                    format!("Password must be at most {max} characters")
                }
                PasswordPolicyError::EmptyOrWhitespace => "Password cannot be empty".to_string(),
                PasswordPolicyError::InvalidCharacter => {
                    "Password contains invalid characters".to_string()
                }
                PasswordPolicyError::CommonPattern => {
                    "Password is too common or follows a predictable pattern".to_string()
                }
            };
            AuthError::PasswordValidation(message)
        })?;

        Ok(Self(clear_text))
    }

    /// Wrap a login attempt; no policy applies
    pub fn for_login(raw: String) -> Self {
        Self(ClearTextPassword::for_verification(raw))
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Admin Password (Hashed, for storage)
// ============================================================================

/// Hashed admin password in PHC string format
#[derive(Clone, PartialEq, Eq)]
pub struct AdminPassword(HashedPassword);

impl AdminPassword {
    /// Hash a validated raw password
    ///
    /// Argon2id is CPU and memory heavy; async callers should run this on
    /// the blocking pool.
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AuthResult<Self> {
        raw.0
            .hash(pepper)
            .map(Self)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    /// Restore from the stored PHC string
    pub fn from_phc_string(s: impl Into<String>) -> AuthResult<Self> {
        HashedPassword::from_phc_string(s)
            .map(Self)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Constant-time verification (inside argon2)
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(&raw.0, pepper)
    }
}

impl fmt::Debug for AdminPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AdminPassword").field(&"[HASH]").finish()
    }
}
