//! # wishhub-service
//!
//! The Mutation Service: every state-changing operation on wishlists and
//! products. Each operation checks exactly one Access Guard predicate
//! before acting, persists through the store, and on success hands its
//! canonical result to the event bridge — exactly one broadcast event per
//! mutation, none on failure.

pub mod context;
pub mod product;
pub mod realtime_access;
pub mod resolve;
pub mod wishlist;

pub use context::RequestContext;
pub use product::service::ProductService;
pub use realtime_access::RoomAccessPolicy;
pub use resolve::ViewResolver;
pub use wishlist::service::WishlistService;
