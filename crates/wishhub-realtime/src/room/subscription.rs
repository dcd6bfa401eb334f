//! Subscription tracking — which connections are in which rooms.

use std::collections::HashSet;

use dashmap::DashMap;

use wishhub_core::types::WishlistId;

use crate::connection::handle::ConnectionId;

/// Tracks connection-to-room subscription mappings (reverse index).
#[derive(Debug, Default)]
pub struct SubscriptionTracker {
    /// Connection ID → set of wishlist rooms.
    conn_to_rooms: DashMap<ConnectionId, HashSet<WishlistId>>,
}

impl SubscriptionTracker {
    /// Creates a new subscription tracker.
    pub fn new() -> Self {
        Self {
            conn_to_rooms: DashMap::new(),
        }
    }

    /// Records a subscription.
    pub fn add(&self, conn_id: ConnectionId, wishlist_id: WishlistId) {
        self.conn_to_rooms
            .entry(conn_id)
            .or_default()
            .insert(wishlist_id);
    }

    /// Removes a subscription.
    pub fn remove(&self, conn_id: ConnectionId, wishlist_id: WishlistId) {
        if let Some(mut rooms) = self.conn_to_rooms.get_mut(&conn_id) {
            rooms.remove(&wishlist_id);
        }
    }

    /// Returns all rooms a connection is subscribed to.
    pub fn rooms_for(&self, conn_id: ConnectionId) -> HashSet<WishlistId> {
        self.conn_to_rooms
            .get(&conn_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Returns the number of subscriptions for a connection.
    pub fn count(&self, conn_id: ConnectionId) -> usize {
        self.conn_to_rooms
            .get(&conn_id)
            .map(|entry| entry.value().len())
            .unwrap_or(0)
    }

    /// Removes all subscriptions for a connection, returning them.
    pub fn remove_all(&self, conn_id: ConnectionId) -> HashSet<WishlistId> {
        self.conn_to_rooms
            .remove(&conn_id)
            .map(|(_, rooms)| rooms)
            .unwrap_or_default()
    }
}
