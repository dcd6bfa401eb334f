//! Wishlist entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wishhub_core::types::{ProductId, UserId, WishlistId};

use super::invite::InviteCode;

/// A named, owned, optionally private collection of products.
///
/// The owner is fixed at creation and is never also a collaborator.
/// Collaborators are unique and kept in insertion order for display;
/// membership checks treat them as a set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wishlist {
    /// Unique wishlist identifier.
    pub id: WishlistId,
    /// Wishlist name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Whether non-members may read this wishlist.
    pub is_private: bool,
    /// The owning user. Immutable after creation.
    pub owner: UserId,
    /// Collaborators, in join order. Never contains the owner.
    pub collaborators: Vec<UserId>,
    /// Contained products, in insertion order.
    pub products: Vec<ProductId>,
    /// Current invite code. `None` only transiently during rotation.
    pub invite_code: Option<InviteCode>,
    /// When the wishlist was created.
    pub created_at: DateTime<Utc>,
    /// When the wishlist was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Wishlist {
    /// Creates a new wishlist owned by `owner` with the given invite code.
    pub fn new(owner: UserId, fields: CreateWishlist, invite_code: InviteCode) -> Self {
        let now = Utc::now();
        Self {
            id: WishlistId::new(),
            name: fields.name,
            description: fields.description.unwrap_or_default(),
            is_private: fields.is_private.unwrap_or(false),
            owner,
            collaborators: Vec::new(),
            products: Vec::new(),
            invite_code: Some(invite_code),
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns whether `user` is this wishlist's owner.
    pub fn is_owner(&self, user: UserId) -> bool {
        self.owner == user
    }

    /// Returns whether `user` is a collaborator (owner excluded).
    pub fn is_collaborator(&self, user: UserId) -> bool {
        self.collaborators.contains(&user)
    }

    /// Returns whether `user` is the owner or a collaborator.
    pub fn is_member(&self, user: UserId) -> bool {
        self.is_owner(user) || self.is_collaborator(user)
    }

    /// Appends a collaborator if not already a member. Returns `false`
    /// when the user was the owner or already present.
    pub fn add_collaborator(&mut self, user: UserId) -> bool {
        if self.is_member(user) {
            return false;
        }
        self.collaborators.push(user);
        self.updated_at = Utc::now();
        true
    }

    /// Removes a collaborator. Returns `false` when the user was not one.
    pub fn remove_collaborator(&mut self, user: UserId) -> bool {
        let before = self.collaborators.len();
        self.collaborators.retain(|c| *c != user);
        let removed = self.collaborators.len() < before;
        if removed {
            self.updated_at = Utc::now();
        }
        removed
    }

    /// Applies a partial field update.
    pub fn apply(&mut self, fields: UpdateWishlistFields) {
        if let Some(name) = fields.name {
            self.name = name;
        }
        if let Some(description) = fields.description {
            self.description = description;
        }
        if let Some(is_private) = fields.is_private {
            self.is_private = is_private;
        }
        self.updated_at = Utc::now();
    }
}

/// Data required to create a new wishlist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWishlist {
    /// Wishlist name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Whether the wishlist is private. Defaults to public.
    pub is_private: Option<bool>,
}

/// Partial update of a wishlist's scalar fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateWishlistFields {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New privacy flag.
    pub is_private: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wishlist(owner: UserId) -> Wishlist {
        Wishlist::new(
            owner,
            CreateWishlist {
                name: "Housewarming".to_string(),
                description: None,
                is_private: Some(true),
            },
            InviteCode::generate(),
        )
    }

    #[test]
    fn owner_is_never_a_collaborator() {
        let owner = UserId::new();
        let mut w = wishlist(owner);
        assert!(!w.add_collaborator(owner));
        assert!(w.collaborators.is_empty());
        assert!(w.is_member(owner));
    }

    #[test]
    fn add_collaborator_is_idempotent() {
        let mut w = wishlist(UserId::new());
        let user = UserId::new();
        assert!(w.add_collaborator(user));
        assert!(!w.add_collaborator(user));
        assert_eq!(w.collaborators.len(), 1);
    }

    #[test]
    fn remove_collaborator_reports_absence() {
        let mut w = wishlist(UserId::new());
        let user = UserId::new();
        assert!(!w.remove_collaborator(user));
        w.add_collaborator(user);
        assert!(w.remove_collaborator(user));
        assert!(!w.is_member(user));
    }

    #[test]
    fn apply_merges_only_present_fields() {
        let mut w = wishlist(UserId::new());
        w.apply(UpdateWishlistFields {
            name: None,
            description: Some("for the new flat".to_string()),
            is_private: Some(false),
        });
        assert_eq!(w.name, "Housewarming");
        assert_eq!(w.description, "for the new flat");
        assert!(!w.is_private);
    }
}
