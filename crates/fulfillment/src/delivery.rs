//! Time-driven delivery of purchase orders.
//!
//! Each purchase order gets two one-shot transitions when it is created:
//! `Processed → InTransit` after [`DeliveryConfig::in_transit_after`], and
//! `InTransit → Delivered` after [`DeliveryConfig::delivered_at`], at which
//! point the ordered quantities are added to inventory.
//!
//! Both callbacks re-check the order's status under the order lock, so a
//! repeated or late callback never moves an order backwards or applies its
//! stock twice.

use std::sync::Arc;
use std::time::Duration;

use common::OrderId;
use domain::{OrderKind, OrderStatus};
use warehouse::{InventoryStore, SupplierDirectory};

use crate::ledger::{Ledger, position};
use crate::scheduler::DeliveryScheduler;
use crate::stock;

/// Delays between purchase order creation and its status transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryConfig {
    /// Delay from creation to `InTransit`.
    pub in_transit_after: Duration,
    /// Delay from `InTransit` to `Delivered`.
    pub delivered_after: Duration,
}

impl DeliveryConfig {
    pub fn new(in_transit_after: Duration, delivered_after: Duration) -> Self {
        Self {
            in_transit_after,
            delivered_after,
        }
    }

    /// Delay from creation to `Delivered`.
    pub fn delivered_at(&self) -> Duration {
        self.in_transit_after.saturating_add(self.delivered_after)
    }
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self::new(Duration::from_secs(10), Duration::from_secs(10))
    }
}

/// Queues both transitions for a newly created purchase order.
pub(crate) fn schedule<I, S, D>(
    ledger: &Arc<Ledger<I, S>>,
    scheduler: &D,
    config: DeliveryConfig,
    order_id: OrderId,
) where
    I: InventoryStore,
    S: SupplierDirectory,
    D: DeliveryScheduler + ?Sized,
{
    let in_transit = Arc::clone(ledger);
    scheduler.schedule_after(
        config.in_transit_after,
        Box::new(move || {
            mark_in_transit(&in_transit, order_id);
        }),
    );

    let delivered = Arc::clone(ledger);
    scheduler.schedule_after(
        config.delivered_at(),
        Box::new(move || {
            complete_delivery(&delivered, order_id);
        }),
    );

    tracing::debug!(
        %order_id,
        in_transit_after = ?config.in_transit_after,
        delivered_at = ?config.delivered_at(),
        "delivery scheduled"
    );
}

/// Moves a `Processed` purchase order to `InTransit`.
///
/// Returns false if the order is unknown or already past `Processed`.
pub(crate) fn mark_in_transit<I, S>(ledger: &Ledger<I, S>, order_id: OrderId) -> bool {
    let mut orders = ledger.orders.write();
    let Some(index) = position(&orders, order_id) else {
        tracing::warn!(%order_id, "in-transit callback for unknown order");
        return false;
    };
    let order = &mut orders[index];
    if order.kind() != OrderKind::Purchase || order.status() != OrderStatus::Processed {
        return false;
    }
    match order.advance_to(OrderStatus::InTransit) {
        Ok(()) => {
            tracing::info!(%order_id, "order in transit");
            true
        }
        Err(err) => {
            tracing::warn!(%order_id, error = %err, "in-transit transition refused");
            false
        }
    }
}

/// Marks a purchase order `Delivered` and adds its quantities to inventory.
///
/// Status and stock change under the same locks, and only on the first call
/// for a given order. Returns false if nothing changed.
pub(crate) fn complete_delivery<I, S>(ledger: &Ledger<I, S>, order_id: OrderId) -> bool
where
    I: InventoryStore,
{
    let mut inventory = ledger.inventory.write();
    let mut orders = ledger.orders.write();
    let Some(index) = position(&orders, order_id) else {
        tracing::warn!(%order_id, "delivery callback for unknown order");
        return false;
    };
    let order = &mut orders[index];
    if order.kind() != OrderKind::Purchase || order.is_delivered() {
        return false;
    }
    if let Err(err) = order.advance_to(OrderStatus::Delivered) {
        tracing::warn!(%order_id, error = %err, "delivery transition refused");
        return false;
    }

    let updated = stock::apply_deferred(&mut *inventory, order.line_items());
    metrics::counter!("deliveries_completed_total").increment(1);
    tracing::info!(%order_id, items_restocked = updated, "order delivered");
    true
}
