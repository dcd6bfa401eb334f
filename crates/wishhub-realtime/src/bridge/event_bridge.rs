//! Completed-mutation → room event mapping.
//!
//! The mutation service calls exactly one bridge method per successful
//! mutation; the bridge builds the wire event and hands it to the router.
//! Failed mutations never reach the bridge, so no partial broadcasts.

use std::sync::Arc;

use wishhub_core::types::{ProductId, UserId, WishlistId};
use wishhub_entity::product::{CommentView, ProductView, ReactionView};
use wishhub_entity::user::UserSummary;
use wishhub_entity::wishlist::WishlistView;

use crate::message::types::OutboundMessage;
use crate::router::RoomRouter;

/// Bridges completed mutations into the room system.
#[derive(Debug)]
pub struct EventBridge {
    /// The broadcast router.
    router: Arc<RoomRouter>,
}

impl EventBridge {
    /// Creates a new event bridge.
    pub fn new(router: Arc<RoomRouter>) -> Self {
        Self { router }
    }

    /// A wishlist was created. Goes out globally — the creator's other
    /// sessions cannot be in a room that did not exist yet. The invite
    /// code is stripped from the broadcast copy.
    pub fn on_wishlist_created(&self, wishlist: &WishlistView) {
        self.router
            .publish_global(&OutboundMessage::WishlistCreated(wishlist.redacted()));
    }

    /// A wishlist's scalar fields changed.
    pub fn on_wishlist_updated(&self, wishlist: &WishlistView) {
        self.router
            .publish(wishlist.id, &OutboundMessage::WishlistUpdated(wishlist.clone()));
    }

    /// A wishlist was deleted; the room dies with it.
    pub fn on_wishlist_deleted(&self, wishlist_id: WishlistId) {
        self.router
            .publish(wishlist_id, &OutboundMessage::WishlistDeleted { wishlist_id });
        self.router.drop_room(wishlist_id);
    }

    /// A collaborator joined via invite code.
    pub fn on_collaborator_added(&self, wishlist_id: WishlistId, user: &UserSummary) {
        self.router.publish(
            wishlist_id,
            &OutboundMessage::CollaboratorAdded {
                wishlist_id,
                user: user.clone(),
            },
        );
    }

    /// A collaborator was removed. Their live subscriptions to this room
    /// are force-torn-down after the event goes out.
    pub fn on_collaborator_removed(&self, wishlist_id: WishlistId, user_id: UserId) {
        self.router.publish(
            wishlist_id,
            &OutboundMessage::CollaboratorRemoved {
                wishlist_id,
                user_id,
            },
        );
        self.router.evict_user(wishlist_id, user_id);
    }

    /// A product was added.
    pub fn on_product_added(&self, product: &ProductView) {
        self.router.publish(
            product.wishlist_id,
            &OutboundMessage::ProductAdded(product.clone()),
        );
    }

    /// A product's fields changed.
    pub fn on_product_updated(&self, product: &ProductView) {
        self.router.publish(
            product.wishlist_id,
            &OutboundMessage::ProductUpdated(product.clone()),
        );
    }

    /// A product was deleted.
    pub fn on_product_deleted(&self, wishlist_id: WishlistId, product_id: ProductId) {
        self.router
            .publish(wishlist_id, &OutboundMessage::ProductDeleted { product_id });
    }

    /// A comment was appended.
    pub fn on_comment_added(
        &self,
        wishlist_id: WishlistId,
        product_id: ProductId,
        comment: &CommentView,
    ) {
        self.router.publish(
            wishlist_id,
            &OutboundMessage::CommentAdded {
                product_id,
                comment: comment.clone(),
            },
        );
    }

    /// A reaction was toggled; carries the full post-toggle list.
    pub fn on_reaction_updated(
        &self,
        wishlist_id: WishlistId,
        product_id: ProductId,
        reactions: &[ReactionView],
    ) {
        self.router.publish(
            wishlist_id,
            &OutboundMessage::ReactionUpdated {
                product_id,
                reactions: reactions.to_vec(),
            },
        );
    }
}
