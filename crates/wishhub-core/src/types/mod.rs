//! Shared domain types.

pub mod id;

pub use id::{ProductId, UserId, WishlistId};
