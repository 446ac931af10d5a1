//! Keyed collections the order pipeline reads and mutates.
//!
//! - [`InventoryStore`]: stock items with unit price and quantity
//! - [`SupplierDirectory`]: suppliers, their item listings and order history
//!
//! Both come with in-memory implementations that also carry the CRUD
//! operations used by the API layer.

pub mod error;
pub mod inventory;
pub mod supplier;

use std::sync::Arc;

use parking_lot::RwLock;

pub use error::{Result, WarehouseError};
pub use inventory::{InMemoryInventory, InventoryItem, InventoryStore, LOW_STOCK_THRESHOLD};
pub use supplier::{InMemorySuppliers, Supplier, SupplierDetails, SupplierDirectory, SupplierItem};

/// A store shared between the order service, its scheduled callbacks and
/// the API layer.
pub type Shared<T> = Arc<RwLock<T>>;

/// Wraps a store for sharing.
pub fn shared<T>(store: T) -> Shared<T> {
    Arc::new(RwLock::new(store))
}
