//! Order pricing.

use domain::{LineItemKey, LineItems, Money, OrderKind};
use warehouse::{InventoryStore, SupplierDirectory};

use crate::error::Rejection;
use crate::validator::ResolvedLine;

/// Prices line items from current unit (sales) or supplier (purchases) prices.
///
/// Prices are looked up fresh. A line whose item, supplier or listing cannot
/// be found contributes zero instead of failing. Amounts saturate rather
/// than overflow. Order creation does not use
/// this path; it prices the lines it has just validated with [`total`].
pub fn price<I, S>(line_items: &LineItems, kind: OrderKind, inventory: &I, suppliers: &S) -> Money
where
    I: InventoryStore + ?Sized,
    S: SupplierDirectory + ?Sized,
{
    line_items
        .iter()
        .map(|(key, quantity)| match unit_price(key, kind, inventory, suppliers) {
            Some(unit_price) => unit_price.multiply(quantity),
            None => {
                tracing::debug!(%key, "no price found, line contributes zero");
                Money::zero()
            }
        })
        .sum()
}

/// Sums already-resolved lines.
///
/// Fails with [`Rejection::TotalOverflow`] if any line total or the running
/// sum leaves the range of [`Money`].
pub fn total(lines: &[ResolvedLine]) -> Result<Money, Rejection> {
    lines.iter().try_fold(Money::zero(), |acc, line| {
        line.line_total()
            .and_then(|line_total| acc.checked_add(line_total))
            .ok_or(Rejection::TotalOverflow)
    })
}

fn unit_price<I, S>(key: &LineItemKey, kind: OrderKind, inventory: &I, suppliers: &S) -> Option<Money>
where
    I: InventoryStore + ?Sized,
    S: SupplierDirectory + ?Sized,
{
    match (kind, *key) {
        (OrderKind::Sale, LineItemKey::Sale(item_id)) => {
            inventory.find_by_id(item_id).map(|item| item.unit_price())
        }
        (
            OrderKind::Purchase,
            LineItemKey::Purchase {
                supplier_id,
                item_id,
            },
        ) => suppliers
            .find_supplier_by_id(supplier_id)?
            .item_by_id(item_id)
            .map(|listing| listing.supplier_price()),
        _ => None,
    }
}
