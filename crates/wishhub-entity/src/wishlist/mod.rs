//! Wishlist entity: the membership ledger plus the owned product list.

pub mod invite;
pub mod model;
pub mod view;

pub use invite::InviteCode;
pub use model::{CreateWishlist, UpdateWishlistFields, Wishlist};
pub use view::{WishlistDetail, WishlistView};
