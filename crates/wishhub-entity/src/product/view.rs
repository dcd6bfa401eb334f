//! Display-ready product projections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wishhub_core::types::{ProductId, WishlistId};

use crate::user::UserSummary;

/// Product projection with referenced users resolved.
///
/// Serialized in the wire protocol's camelCase.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    /// Product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Price.
    pub price: f64,
    /// Optional image reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Owning wishlist.
    pub wishlist_id: WishlistId,
    /// Resolved adder.
    pub added_by: UserSummary,
    /// Resolved last editor.
    pub last_edited_by: UserSummary,
    /// Resolved comments, oldest first.
    pub comments: Vec<CommentView>,
    /// Resolved reactions.
    pub reactions: Vec<ReactionView>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Comment projection with its author resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    /// Comment text.
    pub text: String,
    /// Resolved author.
    pub author: UserSummary,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Reaction projection with its author resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionView {
    /// Emoji code.
    pub emoji: String,
    /// Resolved author.
    pub author: UserSummary,
}
