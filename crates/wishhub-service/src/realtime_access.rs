//! Store-backed room-join authorization.

use std::sync::Arc;

use async_trait::async_trait;

use wishhub_auth::guard;
use wishhub_core::error::AppError;
use wishhub_core::result::AppResult;
use wishhub_core::types::{UserId, WishlistId};
use wishhub_realtime::SubscribePolicy;
use wishhub_store::WishlistRepository;

/// Authorizes room joins against the membership ledger.
///
/// Public wishlists admit anyone, authenticated or not. Private
/// wishlists admit members only; unauthenticated connections are
/// refused outright.
#[derive(Debug)]
pub struct RoomAccessPolicy {
    wishlists: Arc<WishlistRepository>,
}

impl RoomAccessPolicy {
    /// Creates a policy over the wishlist repository.
    pub fn new(wishlists: Arc<WishlistRepository>) -> Self {
        Self { wishlists }
    }
}

#[async_trait]
impl SubscribePolicy for RoomAccessPolicy {
    async fn authorize(&self, actor: Option<UserId>, wishlist_id: WishlistId) -> AppResult<()> {
        let wishlist = self.wishlists.find_by_id(wishlist_id)?;

        if !wishlist.is_private {
            return Ok(());
        }

        match actor {
            Some(user) if guard::can_read(&wishlist, user) => Ok(()),
            Some(_) => Err(AppError::access_denied("Access denied")),
            None => Err(AppError::unauthenticated(
                "Authentication required for private wishlists",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wishhub_core::error::ErrorKind;
    use wishhub_entity::wishlist::{CreateWishlist, InviteCode, Wishlist};

    fn seed(is_private: bool) -> (Arc<WishlistRepository>, Wishlist, UserId) {
        let repo = Arc::new(WishlistRepository::new());
        let owner = UserId::new();
        let wishlist = repo
            .insert(Wishlist::new(
                owner,
                CreateWishlist {
                    name: "Gifts".to_string(),
                    description: None,
                    is_private: Some(is_private),
                },
                InviteCode::generate(),
            ))
            .expect("insert");
        (repo, wishlist, owner)
    }

    #[tokio::test]
    async fn public_rooms_admit_anyone() {
        let (repo, wishlist, _) = seed(false);
        let policy = RoomAccessPolicy::new(repo);
        assert!(policy.authorize(None, wishlist.id).await.is_ok());
        assert!(policy.authorize(Some(UserId::new()), wishlist.id).await.is_ok());
    }

    #[tokio::test]
    async fn private_rooms_admit_members_only() {
        let (repo, wishlist, owner) = seed(true);
        let policy = RoomAccessPolicy::new(repo);

        assert!(policy.authorize(Some(owner), wishlist.id).await.is_ok());

        let err = policy
            .authorize(Some(UserId::new()), wishlist.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::AccessDenied);

        let err = policy.authorize(None, wishlist.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthenticated);
    }

    #[tokio::test]
    async fn unknown_rooms_are_not_found() {
        let repo = Arc::new(WishlistRepository::new());
        let policy = RoomAccessPolicy::new(repo);
        let err = policy
            .authorize(Some(UserId::new()), WishlistId::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
