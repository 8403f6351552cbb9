//! Register Admin Use Case
//!
//! Creates a new admin account in the Credential Store.

use std::sync::Arc;

use kernel::id::AdminId;

use crate::application::config::AuthConfig;
use crate::domain::entity::admin::AdminAccount;
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::{
    admin_password::{AdminPassword, RawPassword},
    email::Email,
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub email: String,
    pub password: String,
}

/// Register admin use case
pub struct RegisterAdminUseCase<R>
where
    R: AdminRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> RegisterAdminUseCase<R>
where
    R: AdminRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<AdminId> {
        if input.email.trim().is_empty() || input.password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let email = Email::new(&input.email)?;

        // Skip the hash when the answer is already known; `create` still
        // enforces uniqueness for concurrent registrations.
        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(AuthError::AdminExists);
        }

        let raw_password = RawPassword::new(input.password)?;
        let pepper = self.config.password_pepper.clone();
        let password_hash = tokio::task::spawn_blocking(move || {
            AdminPassword::from_raw(&raw_password, pepper.as_deref())
        })
        .await
        .map_err(|e| AuthError::Internal(format!("Password hashing task failed: {e}")))??;

        let admin = AdminAccount::new(email, password_hash);
        self.repo.create(&admin).await?;

        tracing::info!(
            admin_id = %admin.admin_id,
            email = %admin.email,
            "Admin registered"
        );

        Ok(admin.admin_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::InMemoryAdminRepository;

    fn use_case() -> (RegisterAdminUseCase<InMemoryAdminRepository>, Arc<InMemoryAdminRepository>) {
        let repo = Arc::new(InMemoryAdminRepository::new());
        let config = Arc::new(AuthConfig::with_random_secret());
        (RegisterAdminUseCase::new(repo.clone(), config), repo)
    }

    fn input(email: &str, password: &str) -> RegisterInput {
        RegisterInput {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_stores_hashed_password() {
        let (use_case, repo) = use_case();
        let admin_id = use_case
            .execute(input("Exam.Cell@College.edu", "Results#Desk2024"))
            .await
            .unwrap();

        let stored = repo
            .find_by_email(&Email::new("exam.cell@college.edu").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.admin_id, admin_id);
        assert!(stored.password_hash.as_phc_string().starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let (use_case, _) = use_case();
        use_case
            .execute(input("admin@college.edu", "Results#Desk2024"))
            .await
            .unwrap();

        let err = use_case
            .execute(input("ADMIN@college.edu", "Another#Pass99"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::AdminExists));
    }

    #[tokio::test]
    async fn test_missing_fields() {
        let (use_case, _) = use_case();
        let err = use_case.execute(input("", "Results#Desk2024")).await.unwrap_err();
        assert!(matches!(err, AuthError::MissingFields));
        let err = use_case.execute(input("admin@college.edu", "")).await.unwrap_err();
        assert!(matches!(err, AuthError::MissingFields));
    }

    #[tokio::test]
    async fn test_weak_password_rejected() {
        let (use_case, repo) = use_case();
        let err = use_case
            .execute(input("admin@college.edu", "12345678"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::PasswordValidation(_)));
        assert!(repo.is_empty());
    }
}
