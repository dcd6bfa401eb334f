//! # wishhub-api
//!
//! The Session Gateway: HTTP surface for mutations and queries, plus the
//! WebSocket surface for room subscriptions and event delivery. The only
//! crate with external interfaces.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
