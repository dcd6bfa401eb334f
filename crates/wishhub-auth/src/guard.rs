//! Access Guard — the single source of truth for wishlist privileges.
//!
//! Every mutation-service operation calls exactly one `ensure_*` function
//! before acting. Violations yield [`AppError::access_denied`], never a
//! silent no-op.

use wishhub_core::error::AppError;
use wishhub_core::types::UserId;
use wishhub_entity::wishlist::Wishlist;

/// Returns whether `actor` may manage the wishlist (owner only).
pub fn can_manage(wishlist: &Wishlist, actor: UserId) -> bool {
    wishlist.is_owner(actor)
}

/// Returns whether `actor` may write to the wishlist (owner or
/// collaborator).
pub fn can_write(wishlist: &Wishlist, actor: UserId) -> bool {
    wishlist.is_member(actor)
}

/// Returns whether `actor` may read the wishlist (any member, or anyone
/// when the wishlist is public).
pub fn can_read(wishlist: &Wishlist, actor: UserId) -> bool {
    can_write(wishlist, actor) || !wishlist.is_private
}

/// Requires manage privilege.
pub fn ensure_manage(wishlist: &Wishlist, actor: UserId) -> Result<(), AppError> {
    if can_manage(wishlist, actor) {
        Ok(())
    } else {
        Err(AppError::access_denied(
            "Only the owner can perform this operation",
        ))
    }
}

/// Requires write privilege.
pub fn ensure_write(wishlist: &Wishlist, actor: UserId) -> Result<(), AppError> {
    if can_write(wishlist, actor) {
        Ok(())
    } else {
        Err(AppError::access_denied("Access denied"))
    }
}

/// Requires read privilege.
pub fn ensure_read(wishlist: &Wishlist, actor: UserId) -> Result<(), AppError> {
    if can_read(wishlist, actor) {
        Ok(())
    } else {
        Err(AppError::access_denied("Access denied"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wishhub_entity::wishlist::{CreateWishlist, InviteCode};

    fn wishlist(owner: UserId, collaborator: UserId, is_private: bool) -> Wishlist {
        let mut w = Wishlist::new(
            owner,
            CreateWishlist {
                name: "Birthday".to_string(),
                description: None,
                is_private: Some(is_private),
            },
            InviteCode::generate(),
        );
        w.add_collaborator(collaborator);
        w
    }

    #[test]
    fn only_owner_can_manage() {
        let owner = UserId::new();
        let collaborator = UserId::new();
        let w = wishlist(owner, collaborator, true);
        assert!(can_manage(&w, owner));
        assert!(!can_manage(&w, collaborator));
        assert!(!can_manage(&w, UserId::new()));
    }

    #[test]
    fn members_can_write() {
        let owner = UserId::new();
        let collaborator = UserId::new();
        let w = wishlist(owner, collaborator, true);
        assert!(can_write(&w, owner));
        assert!(can_write(&w, collaborator));
        assert!(!can_write(&w, UserId::new()));
    }

    #[test]
    fn public_wishlists_are_readable_by_anyone() {
        let w = wishlist(UserId::new(), UserId::new(), false);
        assert!(can_read(&w, UserId::new()));
    }

    #[test]
    fn private_wishlists_are_readable_by_members_only() {
        let owner = UserId::new();
        let collaborator = UserId::new();
        let w = wishlist(owner, collaborator, true);
        assert!(can_read(&w, owner));
        assert!(can_read(&w, collaborator));
        assert!(!can_read(&w, UserId::new()));
    }

    #[test]
    fn ensure_variants_yield_access_denied() {
        let w = wishlist(UserId::new(), UserId::new(), true);
        let stranger = UserId::new();
        for err in [
            ensure_read(&w, stranger).unwrap_err(),
            ensure_write(&w, stranger).unwrap_err(),
            ensure_manage(&w, stranger).unwrap_err(),
        ] {
            assert_eq!(err.kind, wishhub_core::error::ErrorKind::AccessDenied);
        }
    }
}
