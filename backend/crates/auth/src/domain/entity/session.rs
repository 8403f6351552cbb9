//! Session Token Claims
//!
//! Stateless: the signed claims are the whole session. Expiry is the only
//! way a token stops working.

use chrono::{DateTime, Utc};
use kernel::id::AdminId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried inside an HS256 session token (seconds since epoch)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    pub admin_id: Uuid,
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    /// Claims for a token issued at `now` and valid for `ttl`
    pub fn issue(admin_id: AdminId, now: DateTime<Utc>, ttl: std::time::Duration) -> Self {
        let iat = now.timestamp();
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        Self {
            admin_id: admin_id.into_uuid(),
            iat,
            exp: iat.saturating_add(ttl_secs),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }

    pub fn admin_id(&self) -> AdminId {
        AdminId::from_uuid(self.admin_id)
    }
}
