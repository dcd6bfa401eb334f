//! Display-ready wishlist projections.
//!
//! Views carry referenced users resolved to [`UserSummary`] values so the
//! API and the broadcast surface never expose raw identifiers alone, and
//! never anything beyond id, name, and email.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wishhub_core::types::{ProductId, WishlistId};

use crate::product::ProductView;
use crate::user::UserSummary;

use super::invite::InviteCode;
use super::model::Wishlist;

/// Wishlist projection with owner and collaborators resolved.
///
/// Serialized in the wire protocol's camelCase.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistView {
    /// Wishlist identifier.
    pub id: WishlistId,
    /// Wishlist name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Privacy flag.
    pub is_private: bool,
    /// Resolved owner.
    pub owner: UserSummary,
    /// Resolved collaborators, in join order.
    pub collaborators: Vec<UserSummary>,
    /// Contained product ids, in insertion order.
    pub product_ids: Vec<ProductId>,
    /// Invite code. Stripped from globally broadcast copies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite_code: Option<InviteCode>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl WishlistView {
    /// Builds a view from a wishlist document and resolved users.
    pub fn from_wishlist(
        wishlist: &Wishlist,
        owner: UserSummary,
        collaborators: Vec<UserSummary>,
    ) -> Self {
        Self {
            id: wishlist.id,
            name: wishlist.name.clone(),
            description: wishlist.description.clone(),
            is_private: wishlist.is_private,
            owner,
            collaborators,
            product_ids: wishlist.products.clone(),
            invite_code: wishlist.invite_code.clone(),
            created_at: wishlist.created_at,
            updated_at: wishlist.updated_at,
        }
    }

    /// Returns a copy with the invite code stripped, for audiences that
    /// must not learn join capability.
    pub fn redacted(&self) -> Self {
        let mut view = self.clone();
        view.invite_code = None;
        view
    }
}

/// Wishlist projection with contained products fully populated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistDetail {
    /// The wishlist itself.
    #[serde(flatten)]
    pub wishlist: WishlistView,
    /// Populated products, in wishlist order.
    pub products: Vec<ProductView>,
}
