//! Wire message type definitions for the persistent-connection surface.

pub mod types;

pub use types::{InboundMessage, OutboundMessage};
