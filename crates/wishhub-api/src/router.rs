//! Route definitions for the WishHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`, except
//! the WebSocket upgrade and the health probe. The router receives
//! `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(wishlist_routes())
        .merge(product_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .route("/ws", get(handlers::ws::ws_upgrade))
        .route("/health", get(handlers::health::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Wishlist CRUD, membership, and invite endpoints.
fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/wishlists", post(handlers::wishlist::create_wishlist))
        .route("/wishlists/my", get(handlers::wishlist::my_wishlists))
        .route("/wishlists/join", post(handlers::wishlist::join_wishlist))
        .route("/wishlists/{id}", get(handlers::wishlist::get_wishlist))
        .route("/wishlists/{id}", put(handlers::wishlist::update_wishlist))
        .route(
            "/wishlists/{id}",
            delete(handlers::wishlist::delete_wishlist),
        )
        .route(
            "/wishlists/{id}/collaborators/{user_id}",
            delete(handlers::wishlist::remove_collaborator),
        )
        .route(
            "/wishlists/{id}/invite",
            post(handlers::wishlist::rotate_invite_code),
        )
}

/// Product CRUD, comment, and reaction endpoints.
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", post(handlers::product::add_product))
        .route("/products/{id}", get(handlers::product::get_product))
        .route("/products/{id}", put(handlers::product::update_product))
        .route("/products/{id}", delete(handlers::product::delete_product))
        .route(
            "/products/{id}/comments",
            post(handlers::product::add_comment),
        )
        .route(
            "/products/{id}/reactions",
            post(handlers::product::toggle_reaction),
        )
}

/// Build CORS layer from configuration.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use axum::http::{HeaderValue, Method};
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new().allow_headers(Any);

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    cors.max_age(std::time::Duration::from_secs(
        cors_config.max_age_seconds,
    ))
}
