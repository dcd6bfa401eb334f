//! Top-level real-time engine that ties together all subsystems.

use std::sync::Arc;

use tracing::info;

use wishhub_core::config::RealtimeConfig;

use crate::bridge::event_bridge::EventBridge;
use crate::connection::manager::ConnectionManager;
use crate::policy::SubscribePolicy;
use crate::router::RoomRouter;

/// Central real-time engine coordinating rooms, connections, and the
/// mutation bridge.
#[derive(Clone)]
pub struct RealtimeEngine {
    /// The broadcast router.
    pub router: Arc<RoomRouter>,
    /// Connection lifecycle manager.
    pub connections: Arc<ConnectionManager>,
    /// Mutation → event bridge.
    pub bridge: Arc<EventBridge>,
}

impl std::fmt::Debug for RealtimeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealtimeEngine").finish()
    }
}

impl RealtimeEngine {
    /// Creates a new real-time engine with all subsystems.
    pub fn new(config: RealtimeConfig, policy: Arc<dyn SubscribePolicy>) -> Self {
        let router = Arc::new(RoomRouter::new());
        let connections = Arc::new(ConnectionManager::new(
            config,
            Arc::clone(&router),
            policy,
        ));
        let bridge = Arc::new(EventBridge::new(Arc::clone(&router)));

        info!("Real-time engine initialized");

        Self {
            router,
            connections,
            bridge,
        }
    }

    /// Closes all connections (graceful shutdown).
    pub fn shutdown(&self) {
        let all = self.router.pool().all();
        for conn in &all {
            conn.mark_dead();
            self.router.detach(conn.id);
        }
        info!(count = all.len(), "Real-time engine shut down");
    }
}
