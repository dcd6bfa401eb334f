//! Product entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wishhub_core::types::{ProductId, UserId, WishlistId};

use super::comment::Comment;
use super::reaction::Reaction;

/// A product entry on a wishlist.
///
/// Comments and reactions live inline: they have no lifecycle independent
/// of their product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Non-negative price.
    pub price: f64,
    /// Optional image reference.
    pub image_url: Option<String>,
    /// The owning wishlist. Immutable after creation.
    pub wishlist_id: WishlistId,
    /// The member who added this product. Immutable.
    pub added_by: UserId,
    /// The member who last edited this product.
    pub last_edited_by: UserId,
    /// Append-only list of comments, oldest first.
    pub comments: Vec<Comment>,
    /// Reactions, at most one per (author, emoji) pair.
    pub reactions: Vec<Reaction>,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Creates a new product added by `author`.
    pub fn new(author: UserId, fields: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id: ProductId::new(),
            name: fields.name,
            description: fields.description.unwrap_or_default(),
            price: fields.price,
            image_url: fields.image_url,
            wishlist_id: fields.wishlist_id,
            added_by: author,
            last_edited_by: author,
            comments: Vec::new(),
            reactions: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a partial field update on behalf of `editor`.
    ///
    /// Scalar merges are last-writer-wins; there is no version check.
    pub fn apply(&mut self, editor: UserId, fields: UpdateProductFields) {
        if let Some(name) = fields.name {
            self.name = name;
        }
        if let Some(description) = fields.description {
            self.description = description;
        }
        if let Some(price) = fields.price {
            self.price = price;
        }
        if let Some(image_url) = fields.image_url {
            self.image_url = Some(image_url);
        }
        self.last_edited_by = editor;
        self.updated_at = Utc::now();
    }

    /// Appends a comment with a server-side timestamp and returns it.
    pub fn add_comment(&mut self, author: UserId, text: String) -> Comment {
        let comment = Comment::new(author, text);
        self.comments.push(comment.clone());
        self.updated_at = Utc::now();
        comment
    }

    /// Toggles a reaction keyed on (author, emoji).
    ///
    /// Removes the reaction when the pair is already present, appends it
    /// otherwise.
    pub fn toggle_reaction(&mut self, author: UserId, emoji: &str) {
        let existing = self
            .reactions
            .iter()
            .position(|r| r.author == author && r.emoji == emoji);
        match existing {
            Some(index) => {
                self.reactions.remove(index);
            }
            None => {
                self.reactions.push(Reaction::new(author, emoji));
            }
        }
        self.updated_at = Utc::now();
    }
}

/// Data required to create a new product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProduct {
    /// Product name.
    pub name: String,
    /// Non-negative price.
    pub price: f64,
    /// Optional description.
    pub description: Option<String>,
    /// Optional image reference.
    pub image_url: Option<String>,
    /// The wishlist the product belongs to.
    pub wishlist_id: WishlistId,
}

/// Partial update of a product's scalar fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProductFields {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New price.
    pub price: Option<f64>,
    /// New image reference.
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(author: UserId) -> Product {
        Product::new(
            author,
            CreateProduct {
                name: "Kettle".to_string(),
                price: 29.99,
                description: None,
                image_url: None,
                wishlist_id: WishlistId::new(),
            },
        )
    }

    #[test]
    fn toggle_twice_restores_prior_state() {
        let author = UserId::new();
        let mut p = product(author);
        p.toggle_reaction(author, "👍");
        assert_eq!(p.reactions.len(), 1);
        p.toggle_reaction(author, "👍");
        assert!(p.reactions.is_empty());
    }

    #[test]
    fn distinct_emoji_from_one_author_coexist() {
        let author = UserId::new();
        let mut p = product(author);
        p.toggle_reaction(author, "👍");
        p.toggle_reaction(author, "❤️");
        assert_eq!(p.reactions.len(), 2);
        assert!(p.reactions.iter().all(|r| r.author == author));
    }

    #[test]
    fn same_emoji_from_distinct_authors_coexist() {
        let a = UserId::new();
        let b = UserId::new();
        let mut p = product(a);
        p.toggle_reaction(a, "👍");
        p.toggle_reaction(b, "👍");
        assert_eq!(p.reactions.len(), 2);
    }

    #[test]
    fn apply_updates_last_editor() {
        let author = UserId::new();
        let editor = UserId::new();
        let mut p = product(author);
        p.apply(
            editor,
            UpdateProductFields {
                price: Some(24.5),
                ..Default::default()
            },
        );
        assert_eq!(p.price, 24.5);
        assert_eq!(p.added_by, author);
        assert_eq!(p.last_edited_by, editor);
    }

    #[test]
    fn comments_are_append_only_in_order() {
        let author = UserId::new();
        let mut p = product(author);
        p.add_comment(author, "first".to_string());
        p.add_comment(author, "second".to_string());
        assert_eq!(p.comments.len(), 2);
        assert_eq!(p.comments[0].text, "first");
        assert_eq!(p.comments[1].text, "second");
    }
}
