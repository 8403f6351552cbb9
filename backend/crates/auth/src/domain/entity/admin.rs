//! Admin Account Entity

use chrono::{DateTime, Utc};
use kernel::id::AdminId;

use crate::domain::value_object::{admin_password::AdminPassword, email::Email};

/// Admin account held by the Credential Store
///
/// Created at registration and never modified afterwards.
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub admin_id: AdminId,
    pub email: Email,
    pub password_hash: AdminPassword,
    pub created_at: DateTime<Utc>,
}

impl AdminAccount {
    pub fn new(email: Email, password_hash: AdminPassword) -> Self {
        Self {
            admin_id: AdminId::new(),
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}
