//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC-SHA256 key for session tokens (32 bytes)
    pub token_secret: [u8; 32],
    /// Session token lifetime (1 hour)
    pub token_ttl: Duration,
    /// Consecutive failures after which login is refused
    pub max_login_failures: u32,
    /// Failures older than this no longer count; `None` keeps them until a
    /// successful login
    pub lockout_window: Option<Duration>,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

/// Defaults carry a fresh random token secret, never a fixed key
impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: random_secret(),
            token_ttl: Duration::from_secs(3600),
            max_login_failures: 3,
            lockout_window: Some(Duration::from_secs(15 * 60)),
            password_pepper: None,
        }
    }
}

fn random_secret() -> [u8; 32] {
    let mut secret = [0u8; 32];
    secret.copy_from_slice(&platform::crypto::random_bytes(32));
    secret
}

impl AuthConfig {
    /// Create config with a random token secret
    ///
    /// Tokens issued under a random secret die with the process.
    pub fn with_random_secret() -> Self {
        Self::default()
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
