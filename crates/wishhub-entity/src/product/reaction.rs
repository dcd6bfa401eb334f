//! Inline reaction model.

use serde::{Deserialize, Serialize};

use wishhub_core::types::UserId;

/// An emoji reaction on a product.
///
/// A given (author, emoji) pair appears at most once per product; the
/// toggle operation on [`super::Product`] maintains that invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    /// Emoji code.
    pub emoji: String,
    /// Reacting user.
    pub author: UserId,
}

impl Reaction {
    /// Creates a reaction by `author`.
    pub fn new(author: UserId, emoji: impl Into<String>) -> Self {
        Self {
            emoji: emoji.into(),
            author,
        }
    }
}
