//! Application state shared across all handlers.

use std::sync::Arc;

use wishhub_auth::JwtDecoder;
use wishhub_core::config::AppConfig;
use wishhub_realtime::RealtimeEngine;
use wishhub_service::{ProductService, WishlistService};
use wishhub_store::UserDirectory;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Bearer-credential validator.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// User directory (identity reconciliation target).
    pub users: Arc<UserDirectory>,
    /// Wishlist mutation service.
    pub wishlist_service: Arc<WishlistService>,
    /// Product mutation service.
    pub product_service: Arc<ProductService>,
    /// WebSocket realtime engine.
    pub realtime: Arc<RealtimeEngine>,
}
