//! Connection manager — handles connection lifecycle and inbound
//! messages.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use wishhub_core::config::RealtimeConfig;

use crate::message::types::{InboundMessage, OutboundMessage};
use crate::policy::SubscribePolicy;
use crate::router::RoomRouter;

use super::handle::{ConnectionHandle, ConnectionId, ConnectionIdentity};

/// Manages all active WebSocket connections.
pub struct ConnectionManager {
    /// The broadcast router (owns the pool and rooms).
    router: Arc<RoomRouter>,
    /// Room-join authorization.
    policy: Arc<dyn SubscribePolicy>,
    /// Configuration.
    config: RealtimeConfig,
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("config", &self.config)
            .finish()
    }
}

impl ConnectionManager {
    /// Creates a new connection manager.
    pub fn new(
        config: RealtimeConfig,
        router: Arc<RoomRouter>,
        policy: Arc<dyn SubscribePolicy>,
    ) -> Self {
        Self {
            router,
            policy,
            config,
        }
    }

    /// Registers a new connection.
    ///
    /// Returns the connection handle and the receiver for its outbound
    /// frames. Unauthenticated connections register with `None`.
    pub fn register(
        &self,
        identity: Option<ConnectionIdentity>,
    ) -> (Arc<ConnectionHandle>, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(self.config.channel_buffer_size);
        let handle = Arc::new(ConnectionHandle::new(identity, tx));
        self.router.attach(Arc::clone(&handle));

        info!(
            conn_id = %handle.id,
            user_id = ?handle.user_id(),
            "Connection registered"
        );

        (handle, rx)
    }

    /// Unregisters a connection and tears down its subscriptions.
    pub fn unregister(&self, conn_id: ConnectionId) {
        if let Some(handle) = self.router.detach(conn_id) {
            handle.mark_dead();
            info!(
                conn_id = %conn_id,
                user_id = ?handle.user_id(),
                "Connection unregistered"
            );
        }
    }

    /// Processes an inbound message from a client.
    pub async fn handle_inbound(&self, conn_id: ConnectionId, raw: &str) {
        let Some(handle) = self.router.pool().get(&conn_id) else {
            warn!(conn_id = %conn_id, "Message from unknown connection");
            return;
        };

        let msg: InboundMessage = match serde_json::from_str(raw) {
            Ok(m) => m,
            Err(e) => {
                self.router.send_to(
                    conn_id,
                    &OutboundMessage::Error {
                        code: "INVALID_MESSAGE".to_string(),
                        message: format!("Failed to parse message: {e}"),
                    },
                );
                return;
            }
        };

        match msg {
            InboundMessage::JoinWishlist { wishlist_id } => {
                self.handle_join(&handle, wishlist_id).await;
            }
            InboundMessage::LeaveWishlist { wishlist_id } => {
                self.router.unsubscribe(conn_id, wishlist_id);
                debug!(conn_id = %conn_id, wishlist_id = %wishlist_id, "Left room");
            }
        }
    }

    /// Handles a join request with limit and permission checking.
    async fn handle_join(
        &self,
        handle: &ConnectionHandle,
        wishlist_id: wishhub_core::types::WishlistId,
    ) {
        if self.router.rooms().subscription_count(handle.id)
            >= self.config.max_subscriptions_per_connection
        {
            self.router.send_to(
                handle.id,
                &OutboundMessage::Error {
                    code: "MAX_SUBSCRIPTIONS".to_string(),
                    message: format!(
                        "Maximum subscriptions ({}) reached",
                        self.config.max_subscriptions_per_connection
                    ),
                },
            );
            return;
        }

        if let Err(e) = self.policy.authorize(handle.user_id(), wishlist_id).await {
            self.router.send_to(
                handle.id,
                &OutboundMessage::Error {
                    code: e.kind.to_string(),
                    message: e.message,
                },
            );
            return;
        }

        self.router.subscribe(handle.id, wishlist_id);
        self.router
            .send_to(handle.id, &OutboundMessage::Subscribed { wishlist_id });

        debug!(
            conn_id = %handle.id,
            wishlist_id = %wishlist_id,
            "Joined room"
        );
    }
}
