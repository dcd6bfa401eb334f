//! Individual WebSocket connection handle.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use uuid::Uuid;

use wishhub_core::types::UserId;

/// Unique connection identifier.
pub type ConnectionId = Uuid;

/// Authenticated identity attached to a connection at handshake time.
///
/// Absent for unauthenticated connections, which may be established but
/// cannot subscribe to private-wishlist rooms.
#[derive(Debug, Clone)]
pub struct ConnectionIdentity {
    /// The connected user.
    pub user_id: UserId,
    /// Display name (cached for logging).
    pub name: String,
}

/// A handle to a single live connection.
///
/// Holds the sender half of the connection's outbound queue plus identity
/// metadata. Sending is non-blocking: a full or closed queue drops the
/// frame rather than stalling the publisher.
#[derive(Debug)]
pub struct ConnectionHandle {
    /// Unique connection ID.
    pub id: ConnectionId,
    /// Authenticated identity, if any.
    pub identity: Option<ConnectionIdentity>,
    /// Sender for outbound frames.
    sender: mpsc::Sender<String>,
    /// When the connection was established.
    pub connected_at: DateTime<Utc>,
    /// Whether the connection is still alive.
    alive: AtomicBool,
}

impl ConnectionHandle {
    /// Creates a new connection handle.
    pub fn new(identity: Option<ConnectionIdentity>, sender: mpsc::Sender<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            identity,
            sender,
            connected_at: Utc::now(),
            alive: AtomicBool::new(true),
        }
    }

    /// Returns the connected user's id, if authenticated.
    pub fn user_id(&self) -> Option<UserId> {
        self.identity.as_ref().map(|i| i.user_id)
    }

    /// Queues an outbound frame. Returns `false` when the frame was
    /// dropped (queue full or peer gone).
    pub fn send(&self, frame: String) -> bool {
        if !self.is_alive() {
            return false;
        }
        match self.sender.try_send(frame) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(conn_id = %self.id, "Send buffer full, dropping frame");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.mark_dead();
                false
            }
        }
    }

    /// Checks if the connection is alive.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Marks the connection as dead.
    pub fn mark_dead(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_after_receiver_drop_marks_dead() {
        let (tx, rx) = mpsc::channel(4);
        let handle = ConnectionHandle::new(None, tx);
        drop(rx);
        assert!(!handle.send("hello".to_string()));
        assert!(!handle.is_alive());
    }

    #[test]
    fn full_buffer_drops_without_killing_connection() {
        let (tx, mut rx) = mpsc::channel(1);
        let handle = ConnectionHandle::new(None, tx);
        assert!(handle.send("one".to_string()));
        assert!(!handle.send("two".to_string()));
        assert!(handle.is_alive());
        assert_eq!(rx.try_recv().ok(), Some("one".to_string()));
    }
}
