//! Demo inventory and suppliers loaded at start-up.

use common::{ItemId, SupplierId};
use domain::Money;
use warehouse::{
    InMemoryInventory, InMemorySuppliers, InventoryItem, Result, SupplierDetails, WarehouseError,
};

/// Builds the demo stores: three items, three suppliers and their listings.
pub fn demo_stores() -> Result<(InMemoryInventory, InMemorySuppliers)> {
    let mut inventory = InMemoryInventory::new();
    for (id, name, description, price, quantity) in [
        (1, "Laptop", "15-inch portable computer", 1000, 10),
        (2, "Mouse", "Wireless optical mouse", 25, 50),
        (3, "Keyboard", "Mechanical keyboard", 70, 30),
    ] {
        inventory.add_item(InventoryItem::new(
            ItemId::new(id),
            name,
            description,
            Money::from_units(price),
            quantity,
        ))?;
    }

    let mut suppliers = InMemorySuppliers::new();
    for (name, email, phone, location) in [
        ("Acme Supplies", "acme@supplies.com", "02081234567", "London"),
        ("Global Distributors", "contact@global.com", "01709876543", "Birmingham"),
        ("Shell Company", "we_commit@tax_evasion.co.uk", "01234567890", "Gurnsey"),
    ] {
        suppliers.add_supplier(SupplierDetails::new(name, email, phone, location));
    }

    for (supplier, item, price) in [
        (1, 1, 1400),
        (2, 2, 20),
        (3, 1, 1423),
        (3, 2, 23),
        (3, 3, 64),
    ] {
        let item_id = ItemId::new(item);
        let item = inventory
            .items()
            .find(|candidate| candidate.id() == item_id)
            .ok_or(WarehouseError::ItemNotFound(item_id))?;
        suppliers.create_supplier_item(SupplierId::new(supplier), item, Money::from_units(price))?;
    }

    tracing::info!(
        items = inventory.len(),
        suppliers = suppliers.suppliers().count(),
        "demo data loaded"
    );
    Ok((inventory, suppliers))
}
