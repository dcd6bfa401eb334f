//! Inline comment model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wishhub_core::types::UserId;

/// A comment on a product. Comments are append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment text.
    pub text: String,
    /// Comment author.
    pub author: UserId,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a comment timestamped now.
    pub fn new(author: UserId, text: String) -> Self {
        Self {
            text,
            author,
            created_at: Utc::now(),
        }
    }
}
