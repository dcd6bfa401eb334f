//! Room state: per-wishlist subscriber sets and the reverse index.

pub mod registry;
pub mod room;
pub mod subscription;

pub use registry::RoomRegistry;
pub use room::Room;
pub use subscription::SubscriptionTracker;
