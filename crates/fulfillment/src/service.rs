//! Order lifecycle: creation, lookup and delivery hand-off.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use chrono::{DateTime, Utc};
use common::OrderId;
use domain::{LineItemKey, LineItems, Money, Order, OrderKind, SupplierOrderRecord};
use warehouse::{InventoryStore, Shared, SupplierDirectory};

use crate::delivery::{self, DeliveryConfig};
use crate::error::{FulfillmentError, Rejection, Result};
use crate::ledger::{Ledger, position};
use crate::scheduler::DeliveryScheduler;
use crate::validator::{self, ResolvedLine};
use crate::{pricer, stock};

/// Service owning order identity, the order list and delivery scheduling.
///
/// Creation is a single pass under the inventory write lock: line items are
/// resolved, validated and priced against the same state that is then
/// mutated, so a rejected order leaves everything untouched. Sales only read
/// the supplier directory; purchases hold its write lock to append history.
pub struct OrderService<I, S, D> {
    ledger: Arc<Ledger<I, S>>,
    scheduler: D,
    delivery: DeliveryConfig,
    next_id: AtomicU64,
}

impl<I, S, D> OrderService<I, S, D>
where
    I: InventoryStore,
    S: SupplierDirectory,
    D: DeliveryScheduler,
{
    /// Creates a service over shared stores with the default delivery delays.
    pub fn new(inventory: Shared<I>, suppliers: Shared<S>, scheduler: D) -> Self {
        Self {
            ledger: Arc::new(Ledger::new(inventory, suppliers)),
            scheduler,
            delivery: DeliveryConfig::default(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Overrides the delivery delays.
    pub fn with_delivery_config(mut self, delivery: DeliveryConfig) -> Self {
        self.delivery = delivery;
        self
    }

    pub fn inventory(&self) -> &Shared<I> {
        &self.ledger.inventory
    }

    pub fn suppliers(&self) -> &Shared<S> {
        &self.ledger.suppliers
    }

    pub fn delivery_config(&self) -> DeliveryConfig {
        self.delivery
    }

    /// Creates an order from raw `(key, quantity)` pairs.
    ///
    /// Sales take stock immediately and are created `Delivered`. Purchases are
    /// created `Processed`, append a record to each referenced supplier's
    /// history, and have their delivery scheduled.
    ///
    /// # Errors
    ///
    /// Returns [`FulfillmentError::InvalidOrder`] if any line item is
    /// malformed or does not resolve. No state changes in that case.
    #[tracing::instrument(skip(self, items))]
    pub fn create_order<T, K>(&self, items: T, kind: OrderKind) -> Result<OrderId>
    where
        T: IntoIterator<Item = (K, u32)>,
        K: AsRef<str>,
    {
        let started = Instant::now();
        let line_items = LineItems::parse(items, kind).map_err(|err| reject(kind, err.into()))?;

        let (order_id, total) = {
            let mut inventory = self.ledger.inventory.write();
            let created_at = Utc::now();

            match kind {
                OrderKind::Sale => {
                    let suppliers = self.ledger.suppliers.read();
                    let (_, total) = resolve_and_price(&line_items, kind, &*inventory, &*suppliers)
                        .map_err(|rejection| reject(kind, rejection))?;
                    let order_id = self.allocate_id();

                    stock::apply_immediate(&mut *inventory, &line_items);
                    self.push(Order::new(order_id, kind, line_items, total, created_at));
                    (order_id, total)
                }
                OrderKind::Purchase => {
                    let mut suppliers = self.ledger.suppliers.write();
                    let (resolved, total) =
                        resolve_and_price(&line_items, kind, &*inventory, &*suppliers)
                            .map_err(|rejection| reject(kind, rejection))?;
                    let order_id = self.allocate_id();

                    record_supplier_history(
                        &mut *suppliers,
                        &line_items,
                        &resolved,
                        order_id,
                        created_at,
                    );
                    self.push(Order::new(order_id, kind, line_items, total, created_at));
                    (order_id, total)
                }
            }
        };

        if kind == OrderKind::Purchase {
            delivery::schedule(&self.ledger, &self.scheduler, self.delivery, order_id);
        }

        metrics::counter!("orders_created_total", "kind" => kind.as_str()).increment(1);
        metrics::histogram!("order_creation_duration_seconds")
            .record(started.elapsed().as_secs_f64());
        tracing::info!(%order_id, %kind, %total, "order created");

        Ok(order_id)
    }

    /// Prices a proposed order without creating it.
    ///
    /// The order must validate, exactly as [`create_order`](Self::create_order)
    /// would require.
    pub fn quote<T, K>(&self, items: T, kind: OrderKind) -> Result<Money>
    where
        T: IntoIterator<Item = (K, u32)>,
        K: AsRef<str>,
    {
        let line_items = LineItems::parse(items, kind)?;
        let inventory = self.ledger.inventory.read();
        let suppliers = self.ledger.suppliers.read();
        let (_, total) = resolve_and_price(&line_items, kind, &*inventory, &*suppliers)?;
        Ok(total)
    }

    /// Prices well-formed line items at current prices without validating them.
    ///
    /// Unknown items, suppliers or listings contribute zero and stock levels
    /// are ignored. Only a malformed key is an error.
    pub fn price<T, K>(&self, items: T, kind: OrderKind) -> Result<Money>
    where
        T: IntoIterator<Item = (K, u32)>,
        K: AsRef<str>,
    {
        let line_items = LineItems::parse(items, kind)?;
        let inventory = self.ledger.inventory.read();
        let suppliers = self.ledger.suppliers.read();
        Ok(pricer::price(&line_items, kind, &*inventory, &*suppliers))
    }

    /// Returns true if the order would be accepted right now.
    pub fn validate<T, K>(&self, items: T, kind: OrderKind) -> bool
    where
        T: IntoIterator<Item = (K, u32)>,
        K: AsRef<str>,
    {
        self.quote(items, kind).is_ok()
    }

    /// Snapshot of every order in creation order.
    pub fn all_orders(&self) -> Vec<Order> {
        self.ledger.orders.read().clone()
    }

    /// Snapshot of one order, or `None` if the ID is unknown.
    pub fn order_by_id(&self, order_id: OrderId) -> Option<Order> {
        let orders = self.ledger.orders.read();
        position(&orders, order_id).map(|index| orders[index].clone())
    }

    pub fn order_count(&self) -> usize {
        self.ledger.orders.read().len()
    }

    fn allocate_id(&self) -> OrderId {
        OrderId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn push(&self, order: Order) {
        self.ledger.orders.write().push(order);
    }
}

fn resolve_and_price<I, S>(
    line_items: &LineItems,
    kind: OrderKind,
    inventory: &I,
    suppliers: &S,
) -> std::result::Result<(Vec<ResolvedLine>, Money), Rejection>
where
    I: InventoryStore + ?Sized,
    S: SupplierDirectory + ?Sized,
{
    let resolved = validator::resolve(line_items, kind, inventory, suppliers)?;
    let total = pricer::total(&resolved)?;
    Ok((resolved, total))
}

fn reject(kind: OrderKind, rejection: Rejection) -> FulfillmentError {
    metrics::counter!("orders_rejected_total").increment(1);
    tracing::warn!(%kind, reason = %rejection, "order rejected");
    FulfillmentError::InvalidOrder(rejection)
}

/// Appends one record per supplier, holding that supplier's items and sub-total.
///
/// Sub-totals use the unit prices the lines resolved to.
fn record_supplier_history<S>(
    suppliers: &mut S,
    line_items: &LineItems,
    resolved: &[ResolvedLine],
    order_id: OrderId,
    date: DateTime<Utc>,
) where
    S: SupplierDirectory + ?Sized,
{
    let prices: HashMap<LineItemKey, Money> =
        resolved.iter().map(|line| (line.key, line.unit_price)).collect();

    for (supplier_id, items) in line_items.by_supplier() {
        let subtotal: Money = items
            .iter()
            .map(|(&item_id, &quantity)| {
                let key = LineItemKey::Purchase {
                    supplier_id,
                    item_id,
                };
                prices.get(&key).map_or(Money::zero(), |price| price.multiply(quantity))
            })
            .sum();

        let record = SupplierOrderRecord::new(order_id, date, subtotal, items);
        if !suppliers.add_order_record(supplier_id, record) {
            tracing::warn!(%supplier_id, %order_id, "supplier vanished before history was recorded");
        }
    }
}
