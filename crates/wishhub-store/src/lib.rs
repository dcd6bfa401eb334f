//! # wishhub-store
//!
//! Document-store access layer. The persistent engine itself is an
//! external collaborator; this crate implements exactly the access
//! patterns the core requires: per-document atomic updates, a unique
//! invite-code index, the per-user membership index, and the deletion
//! saga log. There are no cross-document transactions.

pub mod collection;
pub mod repositories;
pub mod saga;

pub use repositories::membership::MembershipIndex;
pub use repositories::product::ProductRepository;
pub use repositories::user::UserDirectory;
pub use repositories::wishlist::WishlistRepository;
pub use saga::{DeletionSaga, DeletionSagaLog, DeletionStep};
