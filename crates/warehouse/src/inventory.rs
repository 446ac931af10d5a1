//! Inventory store trait and in-memory implementation.

use std::collections::BTreeMap;

use common::ItemId;
use domain::Money;

use crate::error::{Result, WarehouseError};

/// Items with fewer units than this are reported as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 20;

/// A stock item held in the warehouse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryItem {
    id: ItemId,
    name: String,
    description: String,
    unit_price: Money,
    quantity: u32,
}

impl InventoryItem {
    /// Creates a new inventory item.
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        description: impl Into<String>,
        unit_price: Money,
        quantity: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            unit_price,
            quantity,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Sale price per unit.
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Units currently in stock.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// Read and quantity-write access to stock items.
///
/// This is the surface the order pipeline depends on.
pub trait InventoryStore: Send + Sync + 'static {
    /// Looks up an item by ID.
    fn find_by_id(&self, id: ItemId) -> Option<&InventoryItem>;

    /// Sets the stock quantity of an item. Returns false if the item is unknown.
    fn set_quantity(&mut self, id: ItemId, quantity: u32) -> bool;
}

/// In-memory inventory keyed by item ID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryInventory {
    items: BTreeMap<ItemId, InventoryItem>,
}

impl InMemoryInventory {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new item. IDs are assigned by the caller and must be unique.
    pub fn add_item(&mut self, item: InventoryItem) -> Result<()> {
        if self.items.contains_key(&item.id) {
            return Err(WarehouseError::DuplicateItem(item.id));
        }
        tracing::debug!(item_id = %item.id, name = %item.name, "inventory item added");
        self.items.insert(item.id, item);
        Ok(())
    }

    /// Removes an item, returning it if it existed.
    pub fn remove_item(&mut self, id: ItemId) -> Option<InventoryItem> {
        self.items.remove(&id)
    }

    /// Updates the unit price of an item. Returns false if the item is unknown.
    pub fn update_price(&mut self, id: ItemId, unit_price: Money) -> bool {
        match self.items.get_mut(&id) {
            Some(item) => {
                item.unit_price = unit_price;
                true
            }
            None => false,
        }
    }

    /// Returns all items in ID order.
    pub fn items(&self) -> impl Iterator<Item = &InventoryItem> {
        self.items.values()
    }

    /// Returns the stock level of an item.
    pub fn stock_level(&self, id: ItemId) -> Option<u32> {
        self.items.get(&id).map(|item| item.quantity)
    }

    /// Returns the stock level of every item.
    pub fn stock_levels(&self) -> BTreeMap<ItemId, u32> {
        self.items
            .values()
            .map(|item| (item.id, item.quantity))
            .collect()
    }

    /// Returns items whose quantity is below [`LOW_STOCK_THRESHOLD`].
    pub fn low_stock(&self) -> Vec<&InventoryItem> {
        self.items
            .values()
            .filter(|item| item.quantity < LOW_STOCK_THRESHOLD)
            .collect()
    }

    /// Returns one past the highest item ID in use.
    pub fn next_available_id(&self) -> ItemId {
        let max = self.items.keys().next_back().map_or(0, ItemId::get);
        ItemId::new(max + 1)
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the inventory holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl InventoryStore for InMemoryInventory {
    fn find_by_id(&self, id: ItemId) -> Option<&InventoryItem> {
        self.items.get(&id)
    }

    fn set_quantity(&mut self, id: ItemId, quantity: u32) -> bool {
        match self.items.get_mut(&id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> InMemoryInventory {
        let mut inventory = InMemoryInventory::new();
        inventory
            .add_item(InventoryItem::new(
                ItemId::new(1),
                "Item A",
                "Description of Item A",
                Money::from_units(10),
                100,
            ))
            .unwrap();
        inventory
            .add_item(InventoryItem::new(
                ItemId::new(2),
                "Item B",
                "Description of Item B",
                Money::from_units(20),
                5,
            ))
            .unwrap();
        inventory
    }

    #[test]
    fn test_add_and_find() {
        let inventory = sample();
        let item = inventory.find_by_id(ItemId::new(1)).unwrap();
        assert_eq!(item.name(), "Item A");
        assert_eq!(item.unit_price(), Money::from_units(10));
        assert_eq!(item.quantity(), 100);
        assert!(inventory.find_by_id(ItemId::new(99)).is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut inventory = sample();
        let err = inventory
            .add_item(InventoryItem::new(
                ItemId::new(1),
                "Dup",
                "",
                Money::zero(),
                1,
            ))
            .unwrap_err();
        assert_eq!(err, WarehouseError::DuplicateItem(ItemId::new(1)));
        assert_eq!(inventory.len(), 2);
    }

    #[test]
    fn test_set_quantity() {
        let mut inventory = sample();
        assert!(inventory.set_quantity(ItemId::new(1), 150));
        assert_eq!(inventory.stock_level(ItemId::new(1)), Some(150));
        assert!(!inventory.set_quantity(ItemId::new(99), 1));
    }

    #[test]
    fn test_update_price() {
        let mut inventory = sample();
        assert!(inventory.update_price(ItemId::new(2), Money::from_units(30)));
        assert_eq!(
            inventory.find_by_id(ItemId::new(2)).unwrap().unit_price(),
            Money::from_units(30)
        );
        assert!(!inventory.update_price(ItemId::new(99), Money::zero()));
    }

    #[test]
    fn test_remove_item() {
        let mut inventory = sample();
        assert!(inventory.remove_item(ItemId::new(1)).is_some());
        assert!(inventory.find_by_id(ItemId::new(1)).is_none());
        assert!(inventory.remove_item(ItemId::new(1)).is_none());
    }

    #[test]
    fn test_low_stock() {
        let inventory = sample();
        let low: Vec<ItemId> = inventory.low_stock().iter().map(|i| i.id()).collect();
        assert_eq!(low, vec![ItemId::new(2)]);
    }

    #[test]
    fn test_stock_levels_and_next_id() {
        let inventory = sample();
        let levels = inventory.stock_levels();
        assert_eq!(levels[&ItemId::new(1)], 100);
        assert_eq!(levels[&ItemId::new(2)], 5);
        assert_eq!(inventory.next_available_id(), ItemId::new(3));
        assert_eq!(InMemoryInventory::new().next_available_id(), ItemId::new(1));
    }
}
