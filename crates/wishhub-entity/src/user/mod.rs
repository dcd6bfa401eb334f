//! User projections referenced by core entities.

pub mod model;

pub use model::UserSummary;
