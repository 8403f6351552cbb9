//! In-Memory Repository Implementations
//!
//! Process-local Credential Store used when no database is configured and
//! by tests. Uniqueness is checked and applied under one lock.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::domain::entity::admin::AdminAccount;
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Default)]
pub struct InMemoryAdminRepository {
    admins: RwLock<HashMap<String, AdminAccount>>,
}

impl InMemoryAdminRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.admins.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.admins.read().is_empty()
    }
}

impl AdminRepository for InMemoryAdminRepository {
    async fn create(&self, admin: &AdminAccount) -> AuthResult<()> {
        let mut admins = self.admins.write();
        if admins.contains_key(admin.email.as_str()) {
            return Err(AuthError::AdminExists);
        }
        admins.insert(admin.email.as_str().to_string(), admin.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<AdminAccount>> {
        Ok(self.admins.read().get(email.as_str()).cloned())
    }
}
