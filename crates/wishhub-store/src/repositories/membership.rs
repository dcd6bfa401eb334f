//! Per-user membership index.
//!
//! Maps each user to the wishlists they own or collaborate on, in join
//! order. Maintained on create, join, collaborator removal, and deletion;
//! backs the "my wishlists" listing.

use dashmap::DashMap;

use wishhub_core::types::{UserId, WishlistId};

/// Reverse index from user to accessible wishlists.
#[derive(Debug, Default)]
pub struct MembershipIndex {
    index: DashMap<UserId, Vec<WishlistId>>,
}

impl MembershipIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self {
            index: DashMap::new(),
        }
    }

    /// Records that `user` is a member of `wishlist`. Idempotent.
    pub fn add(&self, user: UserId, wishlist: WishlistId) {
        let mut entry = self.index.entry(user).or_default();
        if !entry.contains(&wishlist) {
            entry.push(wishlist);
        }
    }

    /// Removes `wishlist` from `user`'s memberships. Idempotent.
    pub fn remove(&self, user: UserId, wishlist: WishlistId) {
        if let Some(mut entry) = self.index.get_mut(&user) {
            entry.retain(|w| *w != wishlist);
        }
    }

    /// Removes `wishlist` from every listed member's entry. Idempotent.
    pub fn remove_for_all(&self, members: &[UserId], wishlist: WishlistId) {
        for member in members {
            self.remove(*member, wishlist);
        }
    }

    /// Returns the wishlists `user` belongs to, in join order.
    pub fn wishlists_for(&self, user: UserId) -> Vec<WishlistId> {
        self.index
            .get(&user)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_idempotent_and_ordered() {
        let index = MembershipIndex::new();
        let user = UserId::new();
        let w1 = WishlistId::new();
        let w2 = WishlistId::new();
        index.add(user, w1);
        index.add(user, w2);
        index.add(user, w1);
        assert_eq!(index.wishlists_for(user), vec![w1, w2]);
    }

    #[test]
    fn remove_for_all_unlinks_every_member() {
        let index = MembershipIndex::new();
        let owner = UserId::new();
        let collaborator = UserId::new();
        let w = WishlistId::new();
        index.add(owner, w);
        index.add(collaborator, w);
        index.remove_for_all(&[owner, collaborator], w);
        assert!(index.wishlists_for(owner).is_empty());
        assert!(index.wishlists_for(collaborator).is_empty());
        // Replay is safe.
        index.remove_for_all(&[owner, collaborator], w);
    }
}
