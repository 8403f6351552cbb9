//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::error::conversions::is_unique_violation;
use kernel::id::AdminId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::admin::AdminAccount;
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::{admin_password::AdminPassword, email::Email};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed Credential Store
#[derive(Clone)]
pub struct PgAdminRepository {
    pool: PgPool,
}

impl PgAdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl AdminRepository for PgAdminRepository {
    async fn create(&self, admin: &AdminAccount) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO admins (
                admin_id,
                email,
                password_hash,
                created_at
            ) VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(admin.admin_id.as_uuid())
        .bind(admin.email.as_str())
        .bind(admin.password_hash.as_phc_string())
        .bind(admin.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AuthError::AdminExists
            } else {
                AuthError::Database(e)
            }
        })?;

        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<AdminAccount>> {
        let row = sqlx::query_as::<_, AdminRow>(
            r#"
            SELECT
                admin_id,
                email,
                password_hash,
                created_at
            FROM admins
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(AdminRow::into_admin).transpose()
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct AdminRow {
    admin_id: Uuid,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl AdminRow {
    fn into_admin(self) -> AuthResult<AdminAccount> {
        Ok(AdminAccount {
            admin_id: AdminId::from_uuid(self.admin_id),
            email: Email::from_db(self.email),
            password_hash: AdminPassword::from_phc_string(self.password_hash)?,
            created_at: self.created_at,
        })
    }
}
