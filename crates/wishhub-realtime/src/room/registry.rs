//! Room registry — manages all rooms and subscriptions.

use dashmap::DashMap;

use wishhub_core::types::WishlistId;

use crate::connection::handle::ConnectionId;

use super::room::Room;
use super::subscription::SubscriptionTracker;

/// Registry of all active wishlist rooms.
///
/// Rooms are created lazily on first subscribe and dropped when their
/// last subscriber leaves.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    /// Wishlist ID → room.
    rooms: DashMap<WishlistId, Room>,
    /// Subscription tracker (reverse index).
    subscriptions: SubscriptionTracker,
}

impl RoomRegistry {
    /// Creates a new room registry.
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
            subscriptions: SubscriptionTracker::new(),
        }
    }

    /// Subscribes a connection to a room.
    pub fn subscribe(&self, wishlist_id: WishlistId, conn_id: ConnectionId) {
        self.rooms
            .entry(wishlist_id)
            .or_insert_with(|| Room::new(wishlist_id))
            .subscribe(conn_id);

        self.subscriptions.add(conn_id, wishlist_id);
    }

    /// Unsubscribes a connection from a room.
    pub fn unsubscribe(&self, wishlist_id: WishlistId, conn_id: ConnectionId) {
        if let Some(mut room) = self.rooms.get_mut(&wishlist_id) {
            room.unsubscribe(conn_id);
            if room.is_empty() {
                drop(room);
                self.rooms.remove(&wishlist_id);
            }
        }
        self.subscriptions.remove(conn_id, wishlist_id);
    }

    /// Unsubscribes a connection from all rooms.
    pub fn unsubscribe_all(&self, conn_id: ConnectionId) {
        let rooms = self.subscriptions.remove_all(conn_id);
        for wishlist_id in &rooms {
            if let Some(mut room) = self.rooms.get_mut(wishlist_id) {
                room.unsubscribe(conn_id);
                if room.is_empty() {
                    drop(room);
                    self.rooms.remove(wishlist_id);
                }
            }
        }
    }

    /// Drops a room and every subscription into it (used when the
    /// wishlist itself is deleted).
    pub fn drop_room(&self, wishlist_id: WishlistId) {
        if let Some((_, room)) = self.rooms.remove(&wishlist_id) {
            for conn_id in room.get_subscribers() {
                self.subscriptions.remove(conn_id, wishlist_id);
            }
        }
    }

    /// Returns all subscriber connection IDs for a room.
    pub fn subscribers(&self, wishlist_id: WishlistId) -> Vec<ConnectionId> {
        self.rooms
            .get(&wishlist_id)
            .map(|room| room.get_subscribers())
            .unwrap_or_default()
    }

    /// Returns whether a connection is subscribed to a room.
    pub fn is_subscribed(&self, wishlist_id: WishlistId, conn_id: ConnectionId) -> bool {
        self.subscriptions.rooms_for(conn_id).contains(&wishlist_id)
    }

    /// Returns the subscription count for a connection.
    pub fn subscription_count(&self, conn_id: ConnectionId) -> usize {
        self.subscriptions.count(conn_id)
    }

    /// Returns subscriber count for a room.
    pub fn room_subscriber_count(&self, wishlist_id: WishlistId) -> usize {
        self.rooms
            .get(&wishlist_id)
            .map(|room| room.subscriber_count())
            .unwrap_or(0)
    }

    /// Returns total number of active rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn empty_rooms_are_dropped() {
        let registry = RoomRegistry::new();
        let wishlist = WishlistId::new();
        let conn = Uuid::new_v4();
        registry.subscribe(wishlist, conn);
        assert_eq!(registry.room_count(), 1);
        registry.unsubscribe(wishlist, conn);
        assert_eq!(registry.room_count(), 0);
    }

    #[test]
    fn unsubscribe_all_clears_every_room() {
        let registry = RoomRegistry::new();
        let conn = Uuid::new_v4();
        let other = Uuid::new_v4();
        let w1 = WishlistId::new();
        let w2 = WishlistId::new();
        registry.subscribe(w1, conn);
        registry.subscribe(w2, conn);
        registry.subscribe(w2, other);

        registry.unsubscribe_all(conn);
        assert_eq!(registry.subscription_count(conn), 0);
        assert_eq!(registry.room_subscriber_count(w1), 0);
        assert_eq!(registry.subscribers(w2), vec![other]);
    }

    #[test]
    fn a_connection_may_watch_many_rooms() {
        let registry = RoomRegistry::new();
        let conn = Uuid::new_v4();
        for _ in 0..5 {
            registry.subscribe(WishlistId::new(), conn);
        }
        assert_eq!(registry.subscription_count(conn), 5);
    }

    #[test]
    fn drop_room_clears_reverse_index() {
        let registry = RoomRegistry::new();
        let wishlist = WishlistId::new();
        let conn = Uuid::new_v4();
        registry.subscribe(wishlist, conn);
        registry.drop_room(wishlist);
        assert_eq!(registry.subscription_count(conn), 0);
        assert_eq!(registry.room_count(), 0);
    }
}
