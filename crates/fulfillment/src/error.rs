//! Fulfillment error types.

use common::{ItemId, SupplierId};
use domain::{LineItemKey, OrderError, OrderKind};
use thiserror::Error;

/// Why a proposed order was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The line items could not be parsed.
    #[error(transparent)]
    Malformed(#[from] OrderError),

    /// A key of the wrong shape for the order kind.
    #[error("Line item '{key}' does not belong to a {kind} order")]
    KindMismatch { key: LineItemKey, kind: OrderKind },

    /// The inventory item does not exist.
    #[error("Unknown inventory item: {0}")]
    UnknownItem(ItemId),

    /// Not enough units in stock.
    #[error("Insufficient stock for item {item_id}: requested {requested}, available {available}")]
    InsufficientStock {
        item_id: ItemId,
        requested: u32,
        available: u32,
    },

    /// The supplier does not exist.
    #[error("Unknown supplier: {0}")]
    UnknownSupplier(SupplierId),

    /// The supplier exists but does not list the item.
    #[error("Supplier {supplier_id} does not list item {item_id}")]
    UnlistedItem {
        supplier_id: SupplierId,
        item_id: ItemId,
    },

    /// A line or order total does not fit in the money representation.
    #[error("Order total exceeds the supported amount")]
    TotalOverflow,
}

/// Errors that can occur in the fulfillment pipeline.
#[derive(Debug, Error)]
pub enum FulfillmentError {
    /// Validation failed; nothing was created or mutated.
    #[error("Invalid order: {0}")]
    InvalidOrder(#[from] Rejection),

    /// No runtime is available to run delivery timers.
    #[error("Delivery scheduler unavailable: {0}")]
    SchedulerUnavailable(String),
}

impl FulfillmentError {
    /// Returns the rejection if this is an invalid-order error.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            FulfillmentError::InvalidOrder(rejection) => Some(rejection),
            FulfillmentError::SchedulerUnavailable(_) => None,
        }
    }
}

impl From<OrderError> for FulfillmentError {
    fn from(err: OrderError) -> Self {
        FulfillmentError::InvalidOrder(Rejection::Malformed(err))
    }
}

/// Convenience type alias for fulfillment results.
pub type Result<T> = std::result::Result<T, FulfillmentError>;
