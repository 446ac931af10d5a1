//! Shared identifier types used across the warehouse crates.

mod types;

pub use types::{ItemId, OrderId, SupplierId};
