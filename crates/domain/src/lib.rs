//! Domain layer for the warehouse order system.
//!
//! This crate provides the order model shared by the fulfillment pipeline
//! and its readers:
//! - Line-item keys and their text encoding (`"<item>"`, `"<supplier>:<item>"`)
//! - Order status state machine (`Processed → InTransit → Delivered`)
//! - Order, financial transaction and supplier order history records
//! - Money arithmetic in minor units

pub mod order;

pub use order::{
    FinancialTransaction, LineItemKey, LineItems, Money, Order, OrderError, OrderKind,
    OrderStatus, SupplierOrderRecord,
};
