//! Inventory quantity changes driven by orders.

use domain::{LineItemKey, LineItems};
use warehouse::InventoryStore;

/// Takes sold quantities out of stock. Purchase keys are ignored.
///
/// Runs at sale creation, after validation confirmed there is enough stock.
/// Returns the number of items updated.
pub fn apply_immediate<I>(inventory: &mut I, line_items: &LineItems) -> usize
where
    I: InventoryStore + ?Sized,
{
    let mut applied = 0;
    for (key, quantity) in line_items.iter() {
        let LineItemKey::Sale(item_id) = *key else {
            continue;
        };
        let Some(current) = inventory.find_by_id(item_id).map(|item| item.quantity()) else {
            tracing::warn!(%item_id, "sold item missing from inventory, stock not updated");
            continue;
        };
        inventory.set_quantity(item_id, current.saturating_sub(quantity));
        applied += 1;
    }
    applied
}

/// Adds delivered quantities to stock. Sale keys are ignored.
///
/// The supplier listing shares its ID with the inventory item it supplies.
/// Items no longer in inventory are skipped and logged. Returns the number
/// of items updated.
pub fn apply_deferred<I>(inventory: &mut I, line_items: &LineItems) -> usize
where
    I: InventoryStore + ?Sized,
{
    let mut applied = 0;
    for (key, quantity) in line_items.iter() {
        let LineItemKey::Purchase { item_id, .. } = *key else {
            continue;
        };
        let Some(current) = inventory.find_by_id(item_id).map(|item| item.quantity()) else {
            metrics::counter!("stock_updates_skipped_total").increment(1);
            tracing::warn!(%item_id, quantity, "delivered item missing from inventory, stock update skipped");
            continue;
        };
        let updated = current.checked_add(quantity).unwrap_or_else(|| {
            tracing::warn!(%item_id, current, quantity, "stock level saturated");
            u32::MAX
        });
        inventory.set_quantity(item_id, updated);
        applied += 1;
    }
    applied
}
