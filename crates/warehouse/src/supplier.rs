//! Supplier directory trait and in-memory implementation.

use std::collections::BTreeMap;

use common::{ItemId, SupplierId};
use domain::{Money, SupplierOrderRecord};

use crate::error::{Result, WarehouseError};
use crate::inventory::InventoryItem;

/// An item as listed by a specific supplier.
///
/// Shares its ID with the inventory item it supplies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplierItem {
    id: ItemId,
    name: String,
    description: String,
    supplier_price: Money,
}

impl SupplierItem {
    /// Creates a supplier listing for an existing inventory item.
    pub fn from_inventory(item: &InventoryItem, supplier_price: Money) -> Self {
        Self {
            id: item.id(),
            name: item.name().to_string(),
            description: item.description().to_string(),
            supplier_price,
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

    /// Purchase price per unit from this supplier.
    pub fn supplier_price(&self) -> Money {
        self.supplier_price
    }
}

/// Contact details of a supplier.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SupplierDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
}

impl SupplierDetails {
    /// Creates supplier details.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            location: location.into(),
        }
    }
}

/// A supplier with its item listings and order history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Supplier {
    id: SupplierId,
    details: SupplierDetails,
    items: BTreeMap<ItemId, SupplierItem>,
    history: Vec<SupplierOrderRecord>,
}

impl Supplier {
    fn new(id: SupplierId, details: SupplierDetails) -> Self {
        Self {
            id,
            details,
            items: BTreeMap::new(),
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> SupplierId {
        self.id
    }

    pub fn details(&self) -> &SupplierDetails {
        &self.details
    }

    /// Looks up one of this supplier's listings.
    pub fn item_by_id(&self, item_id: ItemId) -> Option<&SupplierItem> {
        self.items.get(&item_id)
    }

    /// Returns all listings in item ID order.
    pub fn items(&self) -> impl Iterator<Item = &SupplierItem> {
        self.items.values()
    }

    /// Returns the order history, oldest first.
    pub fn order_history(&self) -> &[SupplierOrderRecord] {
        &self.history
    }

    /// Adds a listing, replacing any listing with the same item ID.
    fn upsert_item(&mut self, item: SupplierItem) {
        self.items.insert(item.id, item);
    }
}

/// Supplier lookup and history append.
///
/// This is the surface the order pipeline depends on.
pub trait SupplierDirectory: Send + Sync + 'static {
    /// Looks up a supplier by ID.
    fn find_supplier_by_id(&self, id: SupplierId) -> Option<&Supplier>;

    /// Appends a record to a supplier's history. Returns false if the supplier is unknown.
    fn add_order_record(&mut self, supplier_id: SupplierId, record: SupplierOrderRecord) -> bool;
}

/// In-memory supplier directory. Supplier IDs are assigned from 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemorySuppliers {
    suppliers: BTreeMap<SupplierId, Supplier>,
    next_id: u32,
}

impl Default for InMemorySuppliers {
    fn default() -> Self {
        Self {
            suppliers: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl InMemorySuppliers {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a supplier and returns its assigned ID.
    pub fn add_supplier(&mut self, details: SupplierDetails) -> SupplierId {
        let id = SupplierId::new(self.next_id);
        self.next_id += 1;
        tracing::debug!(supplier_id = %id, name = %details.name, "supplier added");
        self.suppliers.insert(id, Supplier::new(id, details));
        id
    }

    /// Replaces a supplier's contact details. Returns false if the supplier is unknown.
    pub fn update_supplier(&mut self, id: SupplierId, details: SupplierDetails) -> bool {
        match self.suppliers.get_mut(&id) {
            Some(supplier) => {
                supplier.details = details;
                true
            }
            None => false,
        }
    }

    /// Removes a supplier. Returns false if the supplier is unknown.
    pub fn delete_supplier(&mut self, id: SupplierId) -> bool {
        self.suppliers.remove(&id).is_some()
    }

    /// Returns all suppliers in ID order.
    pub fn suppliers(&self) -> impl Iterator<Item = &Supplier> {
        self.suppliers.values()
    }

    /// Lists an inventory item with a supplier at the given price.
    ///
    /// An existing listing for the same item is replaced.
    pub fn create_supplier_item(
        &mut self,
        supplier_id: SupplierId,
        item: &InventoryItem,
        supplier_price: Money,
    ) -> Result<SupplierItem> {
        let supplier = self
            .suppliers
            .get_mut(&supplier_id)
            .ok_or(WarehouseError::SupplierNotFound(supplier_id))?;

        let listing = SupplierItem::from_inventory(item, supplier_price);
        supplier.upsert_item(listing.clone());
        Ok(listing)
    }

    /// Updates the price of a listing. Returns false if supplier or listing is unknown.
    pub fn update_supplier_price(
        &mut self,
        supplier_id: SupplierId,
        item_id: ItemId,
        supplier_price: Money,
    ) -> bool {
        let listing = self
            .suppliers
            .get_mut(&supplier_id)
            .and_then(|supplier| supplier.items.get_mut(&item_id));
        match listing {
            Some(listing) => {
                listing.supplier_price = supplier_price;
                true
            }
            None => false,
        }
    }

    /// Removes a listing. Returns false if supplier or listing is unknown.
    pub fn remove_supplier_item(&mut self, supplier_id: SupplierId, item_id: ItemId) -> bool {
        self.suppliers
            .get_mut(&supplier_id)
            .is_some_and(|supplier| supplier.items.remove(&item_id).is_some())
    }

    /// Returns a supplier's order history; empty for unknown suppliers.
    pub fn order_history(&self, supplier_id: SupplierId) -> &[SupplierOrderRecord] {
        self.suppliers
            .get(&supplier_id)
            .map(Supplier::order_history)
            .unwrap_or_default()
    }
}

impl SupplierDirectory for InMemorySuppliers {
    fn find_supplier_by_id(&self, id: SupplierId) -> Option<&Supplier> {
        self.suppliers.get(&id)
    }

    fn add_order_record(&mut self, supplier_id: SupplierId, record: SupplierOrderRecord) -> bool {
        match self.suppliers.get_mut(&supplier_id) {
            Some(supplier) => {
                supplier.history.push(record);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use common::OrderId;

    use super::*;

    fn item(id: u32, price: i64) -> InventoryItem {
        InventoryItem::new(
            ItemId::new(id),
            format!("Item {id}"),
            format!("Description of item {id}"),
            Money::from_units(price),
            10,
        )
    }

    fn directory() -> (InMemorySuppliers, SupplierId) {
        let mut suppliers = InMemorySuppliers::new();
        let id = suppliers.add_supplier(SupplierDetails::new(
            "Supplier 1",
            "supplier1@example.com",
            "123456789",
            "Location 1",
        ));
        (suppliers, id)
    }

    #[test]
    fn test_add_supplier_assigns_sequential_ids() {
        let (mut suppliers, first) = directory();
        let second = suppliers.add_supplier(SupplierDetails::default());
        assert_eq!(first, SupplierId::new(1));
        assert_eq!(second, SupplierId::new(2));
        assert_eq!(
            suppliers.find_supplier_by_id(first).unwrap().details().name,
            "Supplier 1"
        );
    }

    #[test]
    fn test_update_and_delete_supplier() {
        let (mut suppliers, id) = directory();
        let details = SupplierDetails::new("Updated", "updated@example.com", "111", "New Location");

        assert!(suppliers.update_supplier(id, details.clone()));
        assert_eq!(suppliers.find_supplier_by_id(id).unwrap().details(), &details);

        assert!(suppliers.delete_supplier(id));
        assert!(suppliers.find_supplier_by_id(id).is_none());
        assert!(!suppliers.delete_supplier(id));
    }

    #[test]
    fn test_create_supplier_item_copies_inventory_details() {
        let (mut suppliers, id) = directory();
        let listing = suppliers
            .create_supplier_item(id, &item(1, 10), Money::from_units(8))
            .unwrap();

        assert_eq!(listing.id(), ItemId::new(1));
        assert_eq!(listing.name(), "Item 1");
        assert_eq!(listing.supplier_price(), Money::from_units(8));

        let supplier = suppliers.find_supplier_by_id(id).unwrap();
        assert_eq!(supplier.item_by_id(ItemId::new(1)), Some(&listing));
    }

    #[test]
    fn test_create_supplier_item_replaces_existing_listing() {
        let (mut suppliers, id) = directory();
        suppliers
            .create_supplier_item(id, &item(1, 10), Money::from_units(1423))
            .unwrap();
        suppliers
            .create_supplier_item(id, &item(1, 10), Money::from_units(1400))
            .unwrap();

        let supplier = suppliers.find_supplier_by_id(id).unwrap();
        assert_eq!(supplier.items().count(), 1);
        assert_eq!(
            supplier.item_by_id(ItemId::new(1)).unwrap().supplier_price(),
            Money::from_units(1400)
        );
    }

    #[test]
    fn test_create_supplier_item_unknown_supplier() {
        let (mut suppliers, _) = directory();
        let err = suppliers
            .create_supplier_item(SupplierId::new(9), &item(1, 10), Money::zero())
            .unwrap_err();
        assert_eq!(err, WarehouseError::SupplierNotFound(SupplierId::new(9)));
    }

    #[test]
    fn test_update_and_remove_listing() {
        let (mut suppliers, id) = directory();
        suppliers
            .create_supplier_item(id, &item(2, 20), Money::from_units(15))
            .unwrap();

        assert!(suppliers.update_supplier_price(id, ItemId::new(2), Money::from_units(12)));
        assert!(!suppliers.update_supplier_price(id, ItemId::new(3), Money::from_units(12)));

        assert!(suppliers.remove_supplier_item(id, ItemId::new(2)));
        assert!(!suppliers.remove_supplier_item(id, ItemId::new(2)));
        assert!(
            suppliers
                .find_supplier_by_id(id)
                .unwrap()
                .item_by_id(ItemId::new(2))
                .is_none()
        );
    }

    #[test]
    fn test_order_history_appends() {
        let (mut suppliers, id) = directory();
        let items = BTreeMap::from([(ItemId::new(1), 4)]);
        let record =
            SupplierOrderRecord::new(OrderId::new(7), Utc::now(), Money::from_units(32), items);

        assert!(suppliers.add_order_record(id, record.clone()));
        assert!(!suppliers.add_order_record(SupplierId::new(9), record.clone()));

        assert_eq!(suppliers.order_history(id), &[record]);
        assert!(suppliers.order_history(SupplierId::new(9)).is_empty());
    }
}
