//! Login Use Case
//!
//! Verifies admin credentials behind the failed-attempt throttle and issues
//! a signed session token.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::AdminId;
use platform::throttle::{Admission, FailureCounterStore};

use crate::application::config::AuthConfig;
use crate::domain::entity::session::SessionClaims;
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::{admin_password::RawPassword, email::Email};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub token: String,
    pub admin_id: AdminId,
    pub expires_at: DateTime<Utc>,
}

/// Login use case
pub struct LoginUseCase<R, F>
where
    R: AdminRepository,
    F: FailureCounterStore,
{
    repo: Arc<R>,
    throttle: Arc<F>,
    config: Arc<AuthConfig>,
}

impl<R, F> LoginUseCase<R, F>
where
    R: AdminRepository,
    F: FailureCounterStore,
{
    pub fn new(repo: Arc<R>, throttle: Arc<F>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            throttle,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let key = Email::normalize(&input.email);
        if key.is_empty() || input.password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        // The attempt is counted up front and forgiven on success, so
        // concurrent attempts cannot slip past the limit. Throttled attempts
        // neither reach the Credential Store nor touch the counter.
        let attempt = match self
            .throttle
            .try_begin_attempt(&key, self.config.max_login_failures)
            .await?
        {
            Admission::Admitted { attempt } => attempt,
            Admission::Throttled => return Err(AuthError::TooManyAttempts),
        };

        // A malformed address cannot belong to an admin; count it like any
        // other unknown identifier.
        let admin = match Email::new(&key) {
            Ok(email) => self.repo.find_by_email(&email).await?,
            Err(_) => None,
        };

        let Some(admin) = admin else {
            tracing::warn!(email = %key, failures = attempt, "Login failed: unknown admin");
            return Err(AuthError::InvalidCredentials);
        };

        let raw_password = RawPassword::for_login(input.password);
        let stored = admin.password_hash.clone();
        let pepper = self.config.password_pepper.clone();
        let password_valid = tokio::task::spawn_blocking(move || {
            stored.verify(&raw_password, pepper.as_deref())
        })
        .await
        .map_err(|e| AuthError::Internal(format!("Password verification task failed: {e}")))?;

        if !password_valid {
            tracing::warn!(email = %key, failures = attempt, "Login failed: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        self.throttle.reset(&key).await?;

        let now = Utc::now();
        let claims = SessionClaims::issue(admin.admin_id, now, self.config.token_ttl);
        let token = platform::token::encode(&claims, &self.config.token_secret)
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        let expires_at = DateTime::from_timestamp(claims.exp, 0).unwrap_or(now);

        tracing::info!(admin_id = %admin.admin_id, "Admin logged in");

        Ok(LoginOutput {
            token,
            admin_id: admin.admin_id,
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::register::{RegisterAdminUseCase, RegisterInput};
    use crate::infra::memory::InMemoryAdminRepository;
    use platform::throttle::InMemoryFailureCounter;
    use std::time::Duration;

    const EMAIL: &str = "admin@college.edu";
    const PASSWORD: &str = "Results#Desk2024";

    struct Fixture {
        login: LoginUseCase<InMemoryAdminRepository, InMemoryFailureCounter>,
        throttle: Arc<InMemoryFailureCounter>,
        config: Arc<AuthConfig>,
    }

    async fn fixture(window: Option<Duration>) -> Fixture {
        let repo = Arc::new(InMemoryAdminRepository::new());
        let config = Arc::new(AuthConfig {
            lockout_window: window,
            ..AuthConfig::with_random_secret()
        });
        RegisterAdminUseCase::new(repo.clone(), config.clone())
            .execute(RegisterInput {
                email: EMAIL.to_string(),
                password: PASSWORD.to_string(),
            })
            .await
            .unwrap();

        let throttle = Arc::new(InMemoryFailureCounter::new(window));
        Fixture {
            login: LoginUseCase::new(repo, throttle.clone(), config.clone()),
            throttle,
            config,
        }
    }

    fn input(email: &str, password: &str) -> LoginInput {
        LoginInput {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_issues_one_hour_token() {
        let fx = fixture(None).await;
        let output = fx.login.execute(input(EMAIL, PASSWORD)).await.unwrap();

        let claims: SessionClaims =
            platform::token::decode(&output.token, &fx.config.token_secret).unwrap();
        assert_eq!(claims.admin_id(), output.admin_id);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[tokio::test]
    async fn test_fourth_attempt_is_throttled_even_with_correct_password() {
        let fx = fixture(None).await;
        for _ in 0..3 {
            let err = fx.login.execute(input(EMAIL, "Wrong#Pass000")).await.unwrap_err();
            assert!(matches!(err, AuthError::InvalidCredentials));
        }

        let err = fx.login.execute(input(EMAIL, PASSWORD)).await.unwrap_err();
        assert!(matches!(err, AuthError::TooManyAttempts));
    }

    #[tokio::test]
    async fn test_throttled_attempts_do_not_change_state() {
        let fx = fixture(None).await;
        for _ in 0..3 {
            let _ = fx.login.execute(input(EMAIL, "Wrong#Pass000")).await;
        }
        let before = fx.throttle.entry(EMAIL).unwrap();

        for _ in 0..5 {
            let _ = fx.login.execute(input(EMAIL, "Wrong#Pass000")).await;
        }
        assert_eq!(fx.throttle.entry(EMAIL).unwrap(), before);
        assert_eq!(before.failure_count, 3);
    }

    #[tokio::test]
    async fn test_success_resets_counter() {
        let fx = fixture(None).await;
        for _ in 0..2 {
            let _ = fx.login.execute(input(EMAIL, "Wrong#Pass000")).await;
        }
        fx.login.execute(input(EMAIL, PASSWORD)).await.unwrap();
        assert_eq!(fx.throttle.failures(EMAIL).await.unwrap(), 0);

        // Three fresh failures are needed to lock again
        for _ in 0..2 {
            let _ = fx.login.execute(input(EMAIL, "Wrong#Pass000")).await;
        }
        assert!(fx.login.execute(input(EMAIL, PASSWORD)).await.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_email_counts_as_failure() {
        let fx = fixture(None).await;
        let err = fx
            .login
            .execute(input("ghost@college.edu", PASSWORD))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert_eq!(fx.throttle.failures("ghost@college.edu").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_identifier_case_shares_one_counter() {
        let fx = fixture(None).await;
        let _ = fx.login.execute(input("Admin@College.edu", "Wrong#Pass000")).await;
        let _ = fx.login.execute(input(" ADMIN@college.edu", "Wrong#Pass000")).await;
        let _ = fx.login.execute(input(EMAIL, "Wrong#Pass000")).await;

        let err = fx.login.execute(input(EMAIL, PASSWORD)).await.unwrap_err();
        assert!(matches!(err, AuthError::TooManyAttempts));
    }

    #[tokio::test]
    async fn test_lockout_window_expires() {
        let fx = fixture(Some(Duration::from_millis(50))).await;
        for _ in 0..3 {
            let _ = fx.login.execute(input(EMAIL, "Wrong#Pass000")).await;
        }
        assert!(matches!(
            fx.login.execute(input(EMAIL, PASSWORD)).await,
            Err(AuthError::TooManyAttempts)
        ));

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(fx.login.execute(input(EMAIL, PASSWORD)).await.is_ok());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_wrong_passwords_respect_limit() {
        let fx = Arc::new(fixture(None).await);
        let mut handles = Vec::new();
        for _ in 0..8 {
            let fx = fx.clone();
            handles.push(tokio::spawn(async move {
                fx.login.execute(input(EMAIL, "Wrong#Pass000")).await
            }));
        }

        let mut verified = 0;
        let mut throttled = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Err(AuthError::InvalidCredentials) => verified += 1,
                Err(AuthError::TooManyAttempts) => throttled += 1,
                other => panic!("unexpected outcome: {other:?}"),
            }
        }
        assert_eq!(verified, 3);
        assert_eq!(throttled, 5);
        assert_eq!(fx.throttle.failures(EMAIL).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_missing_fields_do_not_count() {
        let fx = fixture(None).await;
        let err = fx.login.execute(input(EMAIL, "")).await.unwrap_err();
        assert!(matches!(err, AuthError::MissingFields));
        let err = fx.login.execute(input("  ", PASSWORD)).await.unwrap_err();
        assert!(matches!(err, AuthError::MissingFields));
        assert!(fx.throttle.entry(EMAIL).is_none());
    }
}
