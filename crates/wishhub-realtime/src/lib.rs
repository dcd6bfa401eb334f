//! # wishhub-realtime
//!
//! The broadcast subsystem: per-wishlist rooms, live connection
//! bookkeeping, the router that fans events out to room subscribers, and
//! the bridge that turns completed mutations into wire events.
//!
//! All state is owned by constructed instances — there are no ambient
//! globals — so tests can build a router with fake connections.

pub mod bridge;
pub mod connection;
pub mod message;
pub mod policy;
pub mod room;
pub mod router;
pub mod server;

pub use bridge::EventBridge;
pub use connection::{ConnectionHandle, ConnectionId, ConnectionIdentity, ConnectionManager};
pub use message::{InboundMessage, OutboundMessage};
pub use policy::SubscribePolicy;
pub use router::RoomRouter;
pub use server::RealtimeEngine;
