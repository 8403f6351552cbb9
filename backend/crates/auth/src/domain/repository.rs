//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::admin::AdminAccount;
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// Credential Store
#[trait_variant::make(AdminRepository: Send)]
pub trait LocalAdminRepository {
    /// Insert a new admin
    ///
    /// Fails with `AuthError::AdminExists` when the email is taken; the
    /// check is atomic with the insert.
    async fn create(&self, admin: &AdminAccount) -> AuthResult<()>;

    /// Find admin by (normalized) email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<AdminAccount>>;
}
