//! JWT claims structure embedded in bearer credentials.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use wishhub_core::types::UserId;

/// Claims payload carried by every bearer credential.
///
/// The external identity provider signs these; WishHub only reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the user ID.
    pub sub: Uuid,
    /// Display name for convenience.
    pub name: String,
    /// Email address for convenience.
    pub email: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Returns the user ID from the subject claim.
    pub fn user_id(&self) -> UserId {
        UserId::from_uuid(self.sub)
    }

    /// Checks whether this credential has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}
