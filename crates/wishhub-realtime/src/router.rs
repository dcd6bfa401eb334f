//! The Broadcast Router.
//!
//! Maintains the wishlist-id → room mapping and fans completed-mutation
//! events out to exactly the connections subscribed to that room.
//! Delivery is fire-and-forget: frames are queued with a non-blocking
//! send and the mutating caller is never stalled by a slow subscriber.

use std::sync::Arc;

use tracing::{debug, error};

use wishhub_core::types::{UserId, WishlistId};

use crate::connection::handle::{ConnectionHandle, ConnectionId};
use crate::connection::pool::ConnectionPool;
use crate::message::types::OutboundMessage;
use crate::room::registry::RoomRegistry;

/// Routes events to per-wishlist rooms.
#[derive(Debug, Default)]
pub struct RoomRouter {
    rooms: RoomRegistry,
    pool: ConnectionPool,
}

impl RoomRouter {
    /// Creates an empty router.
    pub fn new() -> Self {
        Self {
            rooms: RoomRegistry::new(),
            pool: ConnectionPool::new(),
        }
    }

    /// Attaches a live connection to the router.
    pub fn attach(&self, handle: Arc<ConnectionHandle>) {
        self.pool.add(handle);
    }

    /// Detaches a connection, tearing down all of its subscriptions.
    pub fn detach(&self, conn_id: ConnectionId) -> Option<Arc<ConnectionHandle>> {
        self.rooms.unsubscribe_all(conn_id);
        self.pool.remove(&conn_id)
    }

    /// Subscribes a connection to a wishlist's room.
    pub fn subscribe(&self, conn_id: ConnectionId, wishlist_id: WishlistId) {
        self.rooms.subscribe(wishlist_id, conn_id);
    }

    /// Unsubscribes a connection from a wishlist's room.
    pub fn unsubscribe(&self, conn_id: ConnectionId, wishlist_id: WishlistId) {
        self.rooms.unsubscribe(wishlist_id, conn_id);
    }

    /// Delivers an event to every connection in the wishlist's room.
    /// Returns the number of frames queued.
    pub fn publish(&self, wishlist_id: WishlistId, message: &OutboundMessage) -> usize {
        let Some(frame) = serialize(message) else {
            return 0;
        };

        let mut sent = 0;
        for conn_id in self.rooms.subscribers(wishlist_id) {
            if let Some(handle) = self.pool.get(&conn_id) {
                if handle.send(frame.clone()) {
                    sent += 1;
                }
            }
        }

        debug!(wishlist_id = %wishlist_id, sent, "Published room event");
        sent
    }

    /// Delivers an event to every live connection. Used for events with
    /// no single-room audience, e.g. `wishlist-created`.
    pub fn publish_global(&self, message: &OutboundMessage) -> usize {
        let Some(frame) = serialize(message) else {
            return 0;
        };

        let mut sent = 0;
        for handle in self.pool.all() {
            if handle.send(frame.clone()) {
                sent += 1;
            }
        }

        debug!(sent, "Published global event");
        sent
    }

    /// Sends an event to one connection only.
    pub fn send_to(&self, conn_id: ConnectionId, message: &OutboundMessage) {
        if let (Some(frame), Some(handle)) = (serialize(message), self.pool.get(&conn_id)) {
            handle.send(frame);
        }
    }

    /// Force-unsubscribes every connection of `user_id` from the room.
    /// Used when a collaborator is removed from a wishlist.
    pub fn evict_user(&self, wishlist_id: WishlistId, user_id: UserId) {
        for handle in self.pool.user_connections(user_id) {
            if self.rooms.is_subscribed(wishlist_id, handle.id) {
                self.rooms.unsubscribe(wishlist_id, handle.id);
                debug!(
                    conn_id = %handle.id,
                    user_id = %user_id,
                    wishlist_id = %wishlist_id,
                    "Evicted removed collaborator from room"
                );
            }
        }
    }

    /// Drops a room entirely (wishlist deleted).
    pub fn drop_room(&self, wishlist_id: WishlistId) {
        self.rooms.drop_room(wishlist_id);
    }

    /// Returns the room registry (for subscription checks).
    pub fn rooms(&self) -> &RoomRegistry {
        &self.rooms
    }

    /// Returns the connection pool.
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }
}

fn serialize(message: &OutboundMessage) -> Option<String> {
    match serde_json::to_string(message) {
        Ok(frame) => Some(frame),
        Err(e) => {
            error!(error = %e, "Failed to serialize outbound event");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    use crate::connection::handle::ConnectionIdentity;

    fn fake_connection(
        router: &RoomRouter,
        user_id: Option<UserId>,
    ) -> (Arc<ConnectionHandle>, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(16);
        let identity = user_id.map(|user_id| ConnectionIdentity {
            user_id,
            name: "tester".to_string(),
        });
        let handle = Arc::new(ConnectionHandle::new(identity, tx));
        router.attach(Arc::clone(&handle));
        (handle, rx)
    }

    fn event() -> OutboundMessage {
        OutboundMessage::WishlistDeleted {
            wishlist_id: WishlistId::new(),
        }
    }

    #[test]
    fn publish_reaches_only_room_subscribers() {
        let router = RoomRouter::new();
        let wishlist = WishlistId::new();
        let (in_room, mut in_rx) = fake_connection(&router, None);
        let (_out_of_room, mut out_rx) = fake_connection(&router, None);

        router.subscribe(in_room.id, wishlist);
        assert_eq!(router.publish(wishlist, &event()), 1);

        assert!(in_rx.try_recv().is_ok());
        assert!(out_rx.try_recv().is_err());
    }

    #[test]
    fn publish_global_reaches_everyone() {
        let router = RoomRouter::new();
        let (_a, mut a_rx) = fake_connection(&router, None);
        let (_b, mut b_rx) = fake_connection(&router, None);

        assert_eq!(router.publish_global(&event()), 2);
        assert!(a_rx.try_recv().is_ok());
        assert!(b_rx.try_recv().is_ok());
    }

    #[test]
    fn detach_tears_down_subscriptions() {
        let router = RoomRouter::new();
        let wishlist = WishlistId::new();
        let (conn, _rx) = fake_connection(&router, None);
        router.subscribe(conn.id, wishlist);

        router.detach(conn.id);
        assert_eq!(router.publish(wishlist, &event()), 0);
        assert_eq!(router.rooms().room_count(), 0);
    }

    #[test]
    fn evict_user_removes_only_their_subscriptions() {
        let router = RoomRouter::new();
        let wishlist = WishlistId::new();
        let removed = UserId::new();
        let (gone, _gone_rx) = fake_connection(&router, Some(removed));
        let (stays, mut stays_rx) = fake_connection(&router, Some(UserId::new()));
        router.subscribe(gone.id, wishlist);
        router.subscribe(stays.id, wishlist);

        router.evict_user(wishlist, removed);
        assert_eq!(router.publish(wishlist, &event()), 1);
        assert!(stays_rx.try_recv().is_ok());
    }

    #[test]
    fn room_delivery_preserves_publish_order() {
        let router = RoomRouter::new();
        let wishlist = WishlistId::new();
        let (conn, mut rx) = fake_connection(&router, None);
        router.subscribe(conn.id, wishlist);

        let first = OutboundMessage::ProductDeleted {
            product_id: wishhub_core::types::ProductId::new(),
        };
        let second = event();
        router.publish(wishlist, &first);
        router.publish(wishlist, &second);

        let a = rx.try_recv().expect("first frame");
        let b = rx.try_recv().expect("second frame");
        assert!(a.contains("product-deleted"));
        assert!(b.contains("wishlist-deleted"));
    }
}
