//! Injectable authorization for room joins.

use async_trait::async_trait;

use wishhub_core::result::AppResult;
use wishhub_core::types::{UserId, WishlistId};

/// Decides whether a connection may subscribe to a wishlist's room.
///
/// Implemented over the store by the service layer; tests inject fakes.
/// The check runs once at join time (and again via eviction when a
/// collaborator is removed); individual events are not re-authorized.
#[async_trait]
pub trait SubscribePolicy: Send + Sync {
    /// Authorizes a join. `actor` is `None` for unauthenticated
    /// connections.
    async fn authorize(&self, actor: Option<UserId>, wishlist_id: WishlistId) -> AppResult<()>;
}

/// Policy that admits every join. For tests and closed deployments.
#[derive(Debug, Default)]
pub struct AllowAll;

#[async_trait]
impl SubscribePolicy for AllowAll {
    async fn authorize(&self, _actor: Option<UserId>, _wishlist_id: WishlistId) -> AppResult<()> {
        Ok(())
    }
}
