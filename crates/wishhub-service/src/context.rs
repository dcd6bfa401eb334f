//! Request context carrying the authenticated actor.

use serde::{Deserialize, Serialize};

use wishhub_core::types::UserId;
use wishhub_entity::user::UserSummary;

/// Context for the current authenticated request.
///
/// Extracted from the bearer credential and passed into service methods
/// so every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// Display name from the credential claims.
    pub name: String,
    /// Email from the credential claims.
    pub email: String,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
            email: email.into(),
        }
    }

    /// Returns the actor as a display summary.
    pub fn actor_summary(&self) -> UserSummary {
        UserSummary::new(self.user_id, self.name.clone(), self.email.clone())
    }
}
