//! Wishlist mutation operations.

pub mod service;

pub use service::WishlistService;
