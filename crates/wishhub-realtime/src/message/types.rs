//! Inbound and outbound WebSocket message type definitions.
//!
//! Outbound event names are part of the public protocol; clients match on
//! them verbatim (`wishlist-created`, `product-added`, …).

use serde::{Deserialize, Serialize};

use wishhub_core::types::{ProductId, UserId, WishlistId};
use wishhub_entity::product::{CommentView, ProductView, ReactionView};
use wishhub_entity::user::UserSummary;
use wishhub_entity::wishlist::WishlistView;

/// Messages sent by the client to the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum InboundMessage {
    /// Subscribe to a wishlist's room.
    JoinWishlist {
        /// The wishlist to watch.
        wishlist_id: WishlistId,
    },
    /// Unsubscribe from a wishlist's room.
    LeaveWishlist {
        /// The wishlist to stop watching.
        wishlist_id: WishlistId,
    },
}

/// Messages sent by the server to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum OutboundMessage {
    /// Room subscription confirmed.
    Subscribed {
        /// The joined room's wishlist.
        wishlist_id: WishlistId,
    },
    /// A wishlist was created (global: the room does not exist yet).
    WishlistCreated(WishlistView),
    /// A wishlist's fields changed.
    WishlistUpdated(WishlistView),
    /// A wishlist was deleted.
    WishlistDeleted {
        /// The deleted wishlist.
        wishlist_id: WishlistId,
    },
    /// A collaborator joined via invite code.
    CollaboratorAdded {
        /// The wishlist joined.
        wishlist_id: WishlistId,
        /// The new collaborator.
        user: UserSummary,
    },
    /// A collaborator was removed (or left).
    CollaboratorRemoved {
        /// The wishlist left.
        wishlist_id: WishlistId,
        /// The removed collaborator.
        user_id: UserId,
    },
    /// A product was added.
    ProductAdded(ProductView),
    /// A product's fields changed.
    ProductUpdated(ProductView),
    /// A product was deleted.
    ProductDeleted {
        /// The deleted product.
        product_id: ProductId,
    },
    /// A comment was appended to a product.
    CommentAdded {
        /// The commented product.
        product_id: ProductId,
        /// The new comment.
        comment: CommentView,
    },
    /// A product's reaction list changed.
    ReactionUpdated {
        /// The reacted-to product.
        product_id: ProductId,
        /// The full post-toggle reaction list.
        reactions: Vec<ReactionView>,
    },
    /// The server refused or failed an inbound request.
    Error {
        /// Machine-readable error code.
        code: String,
        /// Error description.
        message: String,
    },
}
