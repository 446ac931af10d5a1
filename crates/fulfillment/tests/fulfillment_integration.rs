//! Integration tests for order creation and delivery.
//!
//! These tests drive the order service through its public API with both the
//! manual and the tokio-backed scheduler.

use std::collections::BTreeMap;
use std::time::Duration;

use common::{ItemId, OrderId, SupplierId};
use domain::{Money, OrderKind, OrderStatus};
use fulfillment::{
    DeliveryConfig, DeliveryScheduler, FulfillmentError, ManualScheduler, OrderService, Rejection,
    TokioScheduler,
};
use warehouse::{InMemoryInventory, InMemorySuppliers, InventoryItem, SupplierDetails, shared};

/// Inventory and suppliers as the warehouse starts out.
fn stores() -> (InMemoryInventory, InMemorySuppliers) {
    let mut inventory = InMemoryInventory::new();
    for (id, name, price, quantity) in [
        (1, "Laptop", 1000, 10),
        (2, "Mouse", 25, 50),
        (3, "Keyboard", 70, 30),
    ] {
        inventory
            .add_item(InventoryItem::new(
                ItemId::new(id),
                name,
                "",
                Money::from_units(price),
                quantity,
            ))
            .unwrap();
    }

    let mut suppliers = InMemorySuppliers::new();
    for name in ["Acme Supplies", "Global Distributors", "Shell Company"] {
        suppliers.add_supplier(SupplierDetails::new(name, "", "", ""));
    }
    let items: Vec<InventoryItem> = inventory.items().cloned().collect();
    for (supplier, item, price) in [(1, 0, 1400), (2, 1, 20), (3, 0, 1423), (3, 1, 23), (3, 2, 64)] {
        suppliers
            .create_supplier_item(SupplierId::new(supplier), &items[item], Money::from_units(price))
            .unwrap();
    }

    (inventory, suppliers)
}

fn create_service<D: DeliveryScheduler>(
    scheduler: D,
) -> OrderService<InMemoryInventory, InMemorySuppliers, D> {
    let (inventory, suppliers) = stores();
    OrderService::new(shared(inventory), shared(suppliers), scheduler)
}

mod delivery {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn purchase_is_delivered_on_tokio_timers() {
        let service = create_service(TokioScheduler::current().unwrap());

        let order_id = service
            .create_order([("3:3", 5)], OrderKind::Purchase)
            .unwrap();
        assert_eq!(
            service.order_by_id(order_id).unwrap().status(),
            OrderStatus::Processed
        );

        tokio::time::sleep(Duration::from_secs(11)).await;
        assert_eq!(
            service.order_by_id(order_id).unwrap().status(),
            OrderStatus::InTransit
        );
        assert_eq!(
            service.inventory().read().stock_level(ItemId::new(3)),
            Some(30)
        );

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(
            service.order_by_id(order_id).unwrap().status(),
            OrderStatus::Delivered
        );
        assert_eq!(
            service.inventory().read().stock_level(ItemId::new(3)),
            Some(35)
        );
    }

    #[test]
    fn custom_delays_are_honoured() {
        let scheduler = ManualScheduler::new();
        let service = create_service(scheduler.clone()).with_delivery_config(
            DeliveryConfig::new(Duration::from_secs(1), Duration::from_secs(2)),
        );

        let order_id = service
            .create_order([("1:1", 1)], OrderKind::Purchase)
            .unwrap();

        scheduler.advance(Duration::from_secs(1));
        assert_eq!(
            service.order_by_id(order_id).unwrap().status(),
            OrderStatus::InTransit
        );
        scheduler.advance(Duration::from_secs(2));
        assert_eq!(
            service.order_by_id(order_id).unwrap().status(),
            OrderStatus::Delivered
        );
        assert_eq!(
            service.inventory().read().stock_level(ItemId::new(1)),
            Some(11)
        );
    }

    #[test]
    fn sales_never_reach_the_scheduler() {
        let scheduler = ManualScheduler::new();
        let service = create_service(scheduler.clone());

        service.create_order([("2", 3)], OrderKind::Sale).unwrap();

        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn snapshots_do_not_follow_later_transitions() {
        let scheduler = ManualScheduler::new();
        let service = create_service(scheduler.clone());
        service
            .create_order([("2:2", 4)], OrderKind::Purchase)
            .unwrap();

        let snapshot = service.all_orders();
        scheduler.run_all();

        assert_eq!(snapshot[0].status(), OrderStatus::Processed);
        assert_eq!(service.all_orders()[0].status(), OrderStatus::Delivered);
    }
}

mod identity {
    use super::*;

    #[test]
    fn ids_increase_across_interleaved_kinds() {
        let service = create_service(ManualScheduler::new());

        let ids: Vec<OrderId> = (0..6)
            .map(|n| {
                if n % 2 == 0 {
                    service.create_order([("2", 1)], OrderKind::Sale)
                } else {
                    service.create_order([("3:2", 1)], OrderKind::Purchase)
                }
                .unwrap()
            })
            .collect();

        let expected: Vec<OrderId> = (1..=6).map(OrderId::new).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn concurrent_creation_never_collides() {
        let service = create_service(ManualScheduler::new());

        std::thread::scope(|scope| {
            for worker in 0..8 {
                let service = &service;
                scope.spawn(move || {
                    for _ in 0..12 {
                        let result = if worker % 2 == 0 {
                            service.create_order([("2", 1)], OrderKind::Sale)
                        } else {
                            service.create_order([("3:3", 1)], OrderKind::Purchase)
                        };
                        result.unwrap();
                    }
                });
            }
        });

        let orders = service.all_orders();
        assert_eq!(orders.len(), 96);
        assert!(orders.windows(2).all(|pair| pair[0].id() < pair[1].id()));
        assert_eq!(orders.last().unwrap().id(), OrderId::new(96));
        assert_eq!(
            service.inventory().read().stock_level(ItemId::new(2)),
            Some(50 - 48)
        );
        assert_eq!(
            service
                .suppliers()
                .read()
                .order_history(SupplierId::new(3))
                .len(),
            48
        );
    }
}

mod atomicity {
    use super::*;

    #[test]
    fn rejected_sale_leaves_state_unchanged() {
        let service = create_service(ManualScheduler::new());
        let inventory_before = service.inventory().read().clone();
        let suppliers_before = service.suppliers().read().clone();

        let result = service.create_order([("1", 2), ("2", 51)], OrderKind::Sale);

        assert!(matches!(
            result,
            Err(FulfillmentError::InvalidOrder(
                Rejection::InsufficientStock { .. }
            ))
        ));
        assert_eq!(*service.inventory().read(), inventory_before);
        assert_eq!(*service.suppliers().read(), suppliers_before);
        assert_eq!(service.order_count(), 0);
    }

    #[test]
    fn rejected_purchase_leaves_state_unchanged() {
        let scheduler = ManualScheduler::new();
        let service = create_service(scheduler.clone());
        let inventory_before = service.inventory().read().clone();
        let suppliers_before = service.suppliers().read().clone();

        let result = service.create_order([("3:3", 5), ("1:2", 1)], OrderKind::Purchase);

        assert!(matches!(
            result,
            Err(FulfillmentError::InvalidOrder(Rejection::UnlistedItem { .. }))
        ));
        assert_eq!(*service.inventory().read(), inventory_before);
        assert_eq!(*service.suppliers().read(), suppliers_before);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn malformed_keys_are_rejected() {
        let service = create_service(ManualScheduler::new());

        for key in ["", "-1", "+1", " 1", "1:", ":1", "1:1:1", "a", "01"] {
            assert!(
                service.create_order([(key, 1)], OrderKind::Sale).is_err(),
                "sale key {key:?} accepted"
            );
        }
        assert!(service.create_order([("3", 1)], OrderKind::Purchase).is_err());
        assert!(service.create_order([("03:3", 1)], OrderKind::Purchase).is_err());
        assert!(service.create_order([("3:3", 1)], OrderKind::Sale).is_err());
        assert!(
            service
                .create_order([("1", 1), ("01", 1)], OrderKind::Sale)
                .is_err()
        );
        assert_eq!(service.order_count(), 0);
    }
}

mod round_trip {
    use super::*;

    #[test]
    fn stored_order_matches_its_input() {
        let service = create_service(ManualScheduler::new());

        for (raw, kind) in [
            (
                BTreeMap::from([("1".to_string(), 2), ("3".to_string(), 4)]),
                OrderKind::Sale,
            ),
            (
                BTreeMap::from([("3:1".to_string(), 1), ("2:2".to_string(), 7)]),
                OrderKind::Purchase,
            ),
        ] {
            let expected = service.price(raw.clone(), kind).unwrap();

            let order_id = service.create_order(raw.clone(), kind).unwrap();
            let order = service.order_by_id(order_id).unwrap();

            assert_eq!(order.line_items().to_raw(), raw);
            assert_eq!(order.kind(), kind);
            assert_eq!(order.total(), expected);
            assert_eq!(order.transaction().total(), expected);
        }
    }
}
