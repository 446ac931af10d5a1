//! Order validation against inventory (sales) or suppliers (purchases).
//!
//! Validation is all-or-nothing: the first failing line item rejects the
//! whole order.

use domain::{LineItemKey, LineItems, Money, OrderError, OrderKind};
use warehouse::{InventoryStore, SupplierDirectory};

use crate::error::Rejection;

/// A validated line item with the unit price it resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedLine {
    pub key: LineItemKey,
    pub quantity: u32,
    /// Inventory unit price for sales, supplier price for purchases.
    pub unit_price: Money,
}

impl ResolvedLine {
    /// Returns `unit_price × quantity`, or `None` if it overflows.
    pub fn line_total(&self) -> Option<Money> {
        self.unit_price.checked_multiply(self.quantity)
    }
}

/// Resolves every line item against current inventory or supplier data.
///
/// Sales require each item to exist with at least the requested quantity in
/// stock. Purchases require the supplier to exist and list the item; supplier
/// capacity is not checked.
pub fn resolve<I, S>(
    line_items: &LineItems,
    kind: OrderKind,
    inventory: &I,
    suppliers: &S,
) -> Result<Vec<ResolvedLine>, Rejection>
where
    I: InventoryStore + ?Sized,
    S: SupplierDirectory + ?Sized,
{
    if line_items.is_empty() {
        return Err(OrderError::NoItems.into());
    }

    let mut resolved = Vec::with_capacity(line_items.len());

    for (key, quantity) in line_items.iter() {
        if quantity == 0 {
            return Err(OrderError::InvalidQuantity {
                key: key.to_string(),
            }
            .into());
        }

        let unit_price = match (kind, *key) {
            (OrderKind::Sale, LineItemKey::Sale(item_id)) => {
                let item = inventory
                    .find_by_id(item_id)
                    .ok_or(Rejection::UnknownItem(item_id))?;
                if item.quantity() < quantity {
                    return Err(Rejection::InsufficientStock {
                        item_id,
                        requested: quantity,
                        available: item.quantity(),
                    });
                }
                item.unit_price()
            }
            (
                OrderKind::Purchase,
                LineItemKey::Purchase {
                    supplier_id,
                    item_id,
                },
            ) => {
                let supplier = suppliers
                    .find_supplier_by_id(supplier_id)
                    .ok_or(Rejection::UnknownSupplier(supplier_id))?;
                let listing = supplier
                    .item_by_id(item_id)
                    .ok_or(Rejection::UnlistedItem {
                        supplier_id,
                        item_id,
                    })?;
                listing.supplier_price()
            }
            _ => return Err(Rejection::KindMismatch { key: *key, kind }),
        };

        resolved.push(ResolvedLine {
            key: *key,
            quantity,
            unit_price,
        });
    }

    Ok(resolved)
}

/// Returns true if the order would be accepted as things stand.
pub fn validate<I, S>(line_items: &LineItems, kind: OrderKind, inventory: &I, suppliers: &S) -> bool
where
    I: InventoryStore + ?Sized,
    S: SupplierDirectory + ?Sized,
{
    resolve(line_items, kind, inventory, suppliers).is_ok()
}
