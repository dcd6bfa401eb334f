//! Request DTOs.
//!
//! Field names follow the wire protocol (camelCase). Validation runs
//! before any mutation is attempted.

use serde::{Deserialize, Serialize};
use validator::Validate;

use wishhub_core::types::WishlistId;

/// Body of `POST /api/wishlists`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWishlistRequest {
    /// Wishlist name.
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Privacy flag; defaults to public.
    pub is_private: Option<bool>,
}

/// Body of `PUT /api/wishlists/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWishlistRequest {
    /// New name.
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New privacy flag.
    pub is_private: Option<bool>,
}

/// Body of `POST /api/wishlists/join`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JoinWishlistRequest {
    /// The invite code to redeem.
    #[validate(length(min = 1, message = "inviteCode must not be empty"))]
    pub invite_code: String,
}

/// Body of `POST /api/products`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    /// Product name.
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    /// Non-negative price.
    #[validate(range(min = 0.0, message = "price must be non-negative"))]
    pub price: f64,
    /// Optional description.
    pub description: Option<String>,
    /// Optional image reference.
    pub image_url: Option<String>,
    /// Target wishlist.
    pub wishlist_id: WishlistId,
}

/// Body of `PUT /api/products/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    /// New name.
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    /// New price.
    #[validate(range(min = 0.0, message = "price must be non-negative"))]
    pub price: Option<f64>,
    /// New description.
    pub description: Option<String>,
    /// New image reference.
    pub image_url: Option<String>,
}

/// Body of `POST /api/products/{id}/comments`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentRequest {
    /// Comment text.
    #[validate(length(min = 1, message = "text must not be empty"))]
    pub text: String,
}

/// Body of `POST /api/products/{id}/reactions`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ToggleReactionRequest {
    /// Emoji code to toggle.
    #[validate(length(min = 1, message = "emoji must not be empty"))]
    pub emoji: String,
}
