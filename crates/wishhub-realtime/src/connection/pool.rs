//! Pool of live connections.

use std::sync::Arc;

use dashmap::DashMap;

use wishhub_core::types::UserId;

use super::handle::{ConnectionHandle, ConnectionId};

/// All currently live connections, addressable by id and by user.
#[derive(Debug, Default)]
pub struct ConnectionPool {
    connections: DashMap<ConnectionId, Arc<ConnectionHandle>>,
}

impl ConnectionPool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    /// Adds a connection.
    pub fn add(&self, handle: Arc<ConnectionHandle>) {
        self.connections.insert(handle.id, handle);
    }

    /// Removes a connection, returning its handle when it existed.
    pub fn remove(&self, conn_id: &ConnectionId) -> Option<Arc<ConnectionHandle>> {
        self.connections.remove(conn_id).map(|(_, handle)| handle)
    }

    /// Looks up a connection by id.
    pub fn get(&self, conn_id: &ConnectionId) -> Option<Arc<ConnectionHandle>> {
        self.connections
            .get(conn_id)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Returns all live connections.
    pub fn all(&self) -> Vec<Arc<ConnectionHandle>> {
        self.connections
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect()
    }

    /// Returns every connection belonging to `user_id`.
    pub fn user_connections(&self, user_id: UserId) -> Vec<Arc<ConnectionHandle>> {
        self.connections
            .iter()
            .filter(|entry| entry.value().user_id() == Some(user_id))
            .map(|entry| Arc::clone(entry.value()))
            .collect()
    }

    /// Returns the number of live connections.
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    /// Returns whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
