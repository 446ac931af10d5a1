//! Warehouse error types.

use common::{ItemId, SupplierId};
use thiserror::Error;

/// Errors that can occur when maintaining inventory or suppliers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WarehouseError {
    /// An inventory item with this ID already exists.
    #[error("Inventory item already exists: {0}")]
    DuplicateItem(ItemId),

    /// The inventory item was not found.
    #[error("Inventory item not found: {0}")]
    ItemNotFound(ItemId),

    /// The supplier was not found.
    #[error("Supplier not found: {0}")]
    SupplierNotFound(SupplierId),
}

/// Result type for warehouse operations.
pub type Result<T> = std::result::Result<T, WarehouseError>;
