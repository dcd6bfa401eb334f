//! Resolves entity documents into display-ready views.
//!
//! Every referenced user comes back as a summary (id, name, email);
//! nothing credential-shaped ever leaves the service layer.

use std::sync::Arc;

use wishhub_entity::product::{Comment, CommentView, Product, ProductView, Reaction, ReactionView};
use wishhub_entity::wishlist::{Wishlist, WishlistDetail, WishlistView};
use wishhub_store::UserDirectory;

/// Builds views by resolving user references through the directory.
#[derive(Debug, Clone)]
pub struct ViewResolver {
    users: Arc<UserDirectory>,
}

impl ViewResolver {
    /// Creates a resolver over the given directory.
    pub fn new(users: Arc<UserDirectory>) -> Self {
        Self { users }
    }

    /// Resolves a wishlist to a view (owner and collaborators populated).
    pub fn wishlist_view(&self, wishlist: &Wishlist) -> WishlistView {
        WishlistView::from_wishlist(
            wishlist,
            self.users.resolve(wishlist.owner),
            self.users.resolve_all(&wishlist.collaborators),
        )
    }

    /// Resolves a wishlist and its products to a populated detail view.
    pub fn wishlist_detail(&self, wishlist: &Wishlist, products: &[Product]) -> WishlistDetail {
        WishlistDetail {
            wishlist: self.wishlist_view(wishlist),
            products: products.iter().map(|p| self.product_view(p)).collect(),
        }
    }

    /// Resolves a product to a view (adder, editor, comment and reaction
    /// authors populated).
    pub fn product_view(&self, product: &Product) -> ProductView {
        ProductView {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
            wishlist_id: product.wishlist_id,
            added_by: self.users.resolve(product.added_by),
            last_edited_by: self.users.resolve(product.last_edited_by),
            comments: product
                .comments
                .iter()
                .map(|c| self.comment_view(c))
                .collect(),
            reactions: self.reaction_views(&product.reactions),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }

    /// Resolves a single comment.
    pub fn comment_view(&self, comment: &Comment) -> CommentView {
        CommentView {
            text: comment.text.clone(),
            author: self.users.resolve(comment.author),
            created_at: comment.created_at,
        }
    }

    /// Resolves a reaction list.
    pub fn reaction_views(&self, reactions: &[Reaction]) -> Vec<ReactionView> {
        reactions
            .iter()
            .map(|r| ReactionView {
                emoji: r.emoji.clone(),
                author: self.users.resolve(r.author),
            })
            .collect()
    }
}
