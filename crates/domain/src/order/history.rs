//! Supplier order history records.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use common::{ItemId, OrderId};

use super::Money;

/// Immutable entry in a supplier's order history.
///
/// Appended when a purchase order referencing the supplier is created,
/// not when it is delivered. `total` covers only this supplier's items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplierOrderRecord {
    order_id: OrderId,
    date: DateTime<Utc>,
    total: Money,
    items: BTreeMap<ItemId, u32>,
}

impl SupplierOrderRecord {
    /// Creates a new record.
    pub fn new(
        order_id: OrderId,
        date: DateTime<Utc>,
        total: Money,
        items: BTreeMap<ItemId, u32>,
    ) -> Self {
        Self {
            order_id,
            date,
            total,
            items,
        }
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn total(&self) -> Money {
        self.total
    }

    /// Supplier item ID → quantity ordered.
    pub fn items(&self) -> &BTreeMap<ItemId, u32> {
        &self.items
    }
}
