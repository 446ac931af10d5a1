//! State shared between the order service and its scheduled callbacks.

use common::OrderId;
use domain::Order;
use parking_lot::RwLock;
use warehouse::Shared;

/// Inventory, suppliers and the append-only order list.
///
/// Lock order: inventory, then suppliers, then orders.
pub(crate) struct Ledger<I, S> {
    pub(crate) inventory: Shared<I>,
    pub(crate) suppliers: Shared<S>,
    pub(crate) orders: RwLock<Vec<Order>>,
}

impl<I, S> Ledger<I, S> {
    pub(crate) fn new(inventory: Shared<I>, suppliers: Shared<S>) -> Self {
        Self {
            inventory,
            suppliers,
            orders: RwLock::new(Vec::new()),
        }
    }
}

/// Orders are appended in ID order, so the list stays sorted.
pub(crate) fn position(orders: &[Order], id: OrderId) -> Option<usize> {
    orders.binary_search_by_key(&id, Order::id).ok()
}
