//! User directory.
//!
//! Identity lives with the external provider; the directory keeps the
//! display projections WishHub has seen so referenced users can be
//! resolved to summaries. Entries are written by the authentication
//! layer on each authenticated request.

use wishhub_core::types::UserId;
use wishhub_entity::user::UserSummary;

use crate::collection::DocumentCollection;

/// Stores display summaries of users seen by the system.
#[derive(Debug, Default)]
pub struct UserDirectory {
    docs: DocumentCollection<UserId, UserSummary>,
}

impl UserDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self {
            docs: DocumentCollection::new(),
        }
    }

    /// Records or refreshes a user's summary.
    pub fn upsert(&self, summary: UserSummary) {
        match self.docs.update(&summary.id, |existing| {
            existing.name = summary.name.clone();
            existing.email = summary.email.clone();
        }) {
            Ok(_) => {}
            Err(_) => self.docs.insert(summary.id, summary),
        }
    }

    /// Resolves a single user to a summary, falling back to a placeholder
    /// for users the directory has not seen.
    pub fn resolve(&self, id: UserId) -> UserSummary {
        self.docs.get(&id).unwrap_or_else(|| UserSummary::unknown(id))
    }

    /// Resolves a batch of users, preserving order.
    pub fn resolve_all(&self, ids: &[UserId]) -> Vec<UserSummary> {
        ids.iter().map(|id| self.resolve(*id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_refreshes_name_and_email() {
        let dir = UserDirectory::new();
        let id = UserId::new();
        dir.upsert(UserSummary::new(id, "Alice", "alice@example.com"));
        dir.upsert(UserSummary::new(id, "Alice B.", "ab@example.com"));
        let resolved = dir.resolve(id);
        assert_eq!(resolved.name, "Alice B.");
        assert_eq!(resolved.email, "ab@example.com");
    }

    #[test]
    fn unseen_users_resolve_to_placeholder() {
        let dir = UserDirectory::new();
        let resolved = dir.resolve(UserId::new());
        assert_eq!(resolved.name, "Unknown user");
        assert!(resolved.first_seen_at.is_none());
    }
}
