//! Product mutation service.

use std::sync::Arc;

use tracing::info;

use wishhub_auth::guard;
use wishhub_core::error::AppError;
use wishhub_core::result::AppResult;
use wishhub_core::types::ProductId;
use wishhub_entity::product::{
    CommentView, CreateProduct, Product, ProductView, ReactionView, UpdateProductFields,
};
use wishhub_entity::wishlist::Wishlist;
use wishhub_realtime::EventBridge;
use wishhub_store::{ProductRepository, WishlistRepository};

use crate::context::RequestContext;
use crate::resolve::ViewResolver;

/// Implements every product-level mutation, including comments and
/// reactions.
#[derive(Debug)]
pub struct ProductService {
    products: Arc<ProductRepository>,
    wishlists: Arc<WishlistRepository>,
    resolver: ViewResolver,
    bridge: Arc<EventBridge>,
}

impl ProductService {
    /// Creates a new product service.
    pub fn new(
        products: Arc<ProductRepository>,
        wishlists: Arc<WishlistRepository>,
        resolver: ViewResolver,
        bridge: Arc<EventBridge>,
    ) -> Self {
        Self {
            products,
            wishlists,
            resolver,
            bridge,
        }
    }

    /// Adds a product to a wishlist. Any member may add.
    pub fn add(&self, ctx: &RequestContext, fields: CreateProduct) -> AppResult<ProductView> {
        let wishlist = self.wishlists.find_by_id(fields.wishlist_id)?;
        guard::ensure_write(&wishlist, ctx.user_id)?;
        validate_name(&fields.name)?;
        validate_price(fields.price)?;

        let product = self.products.insert(Product::new(ctx.user_id, fields));
        self.wishlists
            .update(wishlist.id, |w| w.products.push(product.id))?;

        let view = self.resolver.product_view(&product);
        self.bridge.on_product_added(&view);

        info!(user_id = %ctx.user_id, product_id = %product.id, "Product added");
        Ok(view)
    }

    /// Fetches a product with all user references resolved.
    pub fn get(&self, ctx: &RequestContext, id: ProductId) -> AppResult<ProductView> {
        let product = self.products.find_by_id(id)?;
        let wishlist = self.owning_wishlist(&product)?;
        guard::ensure_read(&wishlist, ctx.user_id)?;
        Ok(self.resolver.product_view(&product))
    }

    /// Updates a product's scalar fields. Any member may edit, not only
    /// the adder. Concurrent edits are last-writer-wins.
    pub fn update(
        &self,
        ctx: &RequestContext,
        id: ProductId,
        fields: UpdateProductFields,
    ) -> AppResult<ProductView> {
        let product = self.products.find_by_id(id)?;
        let wishlist = self.owning_wishlist(&product)?;
        guard::ensure_write(&wishlist, ctx.user_id)?;

        if let Some(name) = &fields.name {
            validate_name(name)?;
        }
        if let Some(price) = fields.price {
            validate_price(price)?;
        }

        let updated = self.products.update(id, |p| p.apply(ctx.user_id, fields))?;
        let view = self.resolver.product_view(&updated);
        self.bridge.on_product_updated(&view);

        info!(user_id = %ctx.user_id, product_id = %id, "Product updated");
        Ok(view)
    }

    /// Deletes a product, unlinking it from its wishlist.
    pub fn delete(&self, ctx: &RequestContext, id: ProductId) -> AppResult<()> {
        let product = self.products.find_by_id(id)?;
        let wishlist = self.owning_wishlist(&product)?;
        guard::ensure_write(&wishlist, ctx.user_id)?;

        self.wishlists
            .update(wishlist.id, |w| w.products.retain(|p| *p != id))?;
        self.products.delete(id);

        self.bridge.on_product_deleted(wishlist.id, id);
        info!(user_id = %ctx.user_id, product_id = %id, "Product deleted");
        Ok(())
    }

    /// Appends a comment with a server-side timestamp and returns it.
    pub fn add_comment(
        &self,
        ctx: &RequestContext,
        id: ProductId,
        text: &str,
    ) -> AppResult<CommentView> {
        let product = self.products.find_by_id(id)?;
        let wishlist = self.owning_wishlist(&product)?;
        guard::ensure_write(&wishlist, ctx.user_id)?;

        if text.trim().is_empty() {
            return Err(AppError::validation("Comment text must not be empty"));
        }

        let mut created = None;
        self.products.update(id, |p| {
            created = Some(p.add_comment(ctx.user_id, text.to_string()));
        })?;
        let comment = created.ok_or_else(|| AppError::internal("Comment was not recorded"))?;

        let view = self.resolver.comment_view(&comment);
        self.bridge.on_comment_added(wishlist.id, id, &view);

        info!(user_id = %ctx.user_id, product_id = %id, "Comment added");
        Ok(view)
    }

    /// Toggles the caller's reaction keyed on (user, emoji) and returns
    /// the full post-toggle reaction list.
    ///
    /// The toggle runs inside the product's entry lock, so two racing
    /// identical requests resolve to one add and one remove, never a
    /// duplicate.
    pub fn toggle_reaction(
        &self,
        ctx: &RequestContext,
        id: ProductId,
        emoji: &str,
    ) -> AppResult<Vec<ReactionView>> {
        let product = self.products.find_by_id(id)?;
        let wishlist = self.owning_wishlist(&product)?;
        guard::ensure_write(&wishlist, ctx.user_id)?;

        if emoji.trim().is_empty() {
            return Err(AppError::validation("Emoji must not be empty"));
        }

        let updated = self
            .products
            .update(id, |p| p.toggle_reaction(ctx.user_id, emoji))?;

        let views = self.resolver.reaction_views(&updated.reactions);
        self.bridge.on_reaction_updated(wishlist.id, id, &views);

        info!(user_id = %ctx.user_id, product_id = %id, "Reaction toggled");
        Ok(views)
    }

    fn owning_wishlist(&self, product: &Product) -> AppResult<Wishlist> {
        self.wishlists.find_by_id(product.wishlist_id)
    }
}

fn validate_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::validation("Product name must not be empty"));
    }
    Ok(())
}

fn validate_price(price: f64) -> AppResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::validation("Price must be a non-negative number"));
    }
    Ok(())
}
