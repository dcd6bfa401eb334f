//! Product mutation operations.

pub mod service;

pub use service::ProductService;
