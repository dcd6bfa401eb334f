//! User summary model.
//!
//! Users are owned by the external identity provider. WishHub keeps only
//! the display-ready projection it needs to resolve references: id, name,
//! and email. Credentials never enter this system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wishhub_core::types::UserId;

/// Display-ready projection of a referenced user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    /// Unique user identifier (issued by the identity provider).
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// When this user was first seen by WishHub.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_seen_at: Option<DateTime<Utc>>,
}

impl UserSummary {
    /// Creates a summary for a user seen now.
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            first_seen_at: Some(Utc::now()),
        }
    }

    /// Placeholder summary for a referenced user the directory has not seen.
    pub fn unknown(id: UserId) -> Self {
        Self {
            id,
            name: "Unknown user".to_string(),
            email: String::new(),
            first_seen_at: None,
        }
    }
}
