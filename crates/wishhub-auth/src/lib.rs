//! # wishhub-auth
//!
//! Bearer-credential validation and the Access Guard.
//!
//! Identity itself is owned by an external provider; this crate only
//! validates the credentials it issues and decides what an authenticated
//! actor may do to a given wishlist.

pub mod guard;
pub mod jwt;

pub use guard::{can_manage, can_read, can_write, ensure_manage, ensure_read, ensure_write};
pub use jwt::{Claims, JwtDecoder};
