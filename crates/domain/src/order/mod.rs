//! Order model and related types.

mod history;
mod line_items;
mod record;
mod state;
mod value_objects;

pub use history::SupplierOrderRecord;
pub use line_items::{LineItemKey, LineItems};
pub use record::{FinancialTransaction, Order};
pub use state::OrderStatus;
pub use value_objects::{Money, OrderKind};

use thiserror::Error;

/// Errors that can occur while building or mutating an order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// A line-item key does not follow the text contract for its order kind.
    #[error("Invalid {kind} line item key: '{key}'")]
    InvalidLineItemKey { key: String, kind: OrderKind },

    /// Invalid quantity.
    #[error("Invalid quantity for line item '{key}' (must be greater than 0)")]
    InvalidQuantity { key: String },

    /// Two raw keys denote the same line item.
    #[error("Duplicate line item: '{key}'")]
    DuplicateLineItem { key: String },

    /// Order has no items.
    #[error("Order has no items")]
    NoItems,

    /// Status may only move forward.
    #[error("Invalid status transition: cannot move from {from} to {to}")]
    InvalidStatusTransition { from: OrderStatus, to: OrderStatus },
}
