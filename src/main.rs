//! WishHub Server — collaborative wishlist platform.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use wishhub_core::config::AppConfig;
use wishhub_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("WISHHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting WishHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Store layer ──────────────────────────────────────
    let wishlists = Arc::new(wishhub_store::WishlistRepository::new());
    let products = Arc::new(wishhub_store::ProductRepository::new());
    let users = Arc::new(wishhub_store::UserDirectory::new());
    let membership = Arc::new(wishhub_store::MembershipIndex::new());
    let sagas = Arc::new(wishhub_store::DeletionSagaLog::new());

    // ── Step 2: Auth ─────────────────────────────────────────────
    let jwt_decoder = Arc::new(wishhub_auth::JwtDecoder::new(&config.auth));

    // ── Step 3: Realtime engine ──────────────────────────────────
    let policy = Arc::new(wishhub_service::RoomAccessPolicy::new(Arc::clone(
        &wishlists,
    )));
    let realtime = Arc::new(wishhub_realtime::RealtimeEngine::new(
        config.realtime.clone(),
        policy,
    ));
    tracing::info!("Realtime engine initialized");

    // ── Step 4: Services ─────────────────────────────────────────
    let resolver = wishhub_service::ViewResolver::new(Arc::clone(&users));
    let wishlist_service = Arc::new(wishhub_service::WishlistService::new(
        Arc::clone(&wishlists),
        Arc::clone(&products),
        Arc::clone(&membership),
        Arc::clone(&sagas),
        resolver.clone(),
        Arc::clone(&realtime.bridge),
    ));
    let product_service = Arc::new(wishhub_service::ProductService::new(
        Arc::clone(&products),
        Arc::clone(&wishlists),
        resolver,
        Arc::clone(&realtime.bridge),
    ));
    tracing::info!("Services initialized");

    // ── Step 5: Replay deletions interrupted by a crash ──────────
    let replayed = wishlist_service.recover_incomplete_deletes()?;
    if replayed > 0 {
        tracing::warn!(count = replayed, "Replayed incomplete wishlist deletions");
    }

    // ── Step 6: Build and start HTTP server ──────────────────────
    let app_state = wishhub_api::AppState {
        config: Arc::new(config.clone()),
        jwt_decoder,
        users,
        wishlist_service,
        product_service,
        realtime: Arc::clone(&realtime),
    };

    let app = wishhub_api::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("WishHub server listening on {}", addr);

    // ── Step 7: Graceful shutdown ────────────────────────────────
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    realtime.shutdown();
    tracing::info!("WishHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
