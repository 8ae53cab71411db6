//! Integration tests for the full order/ledger pipeline.
//!
//! Tests: OrderEngine → LedgerStore atomic units → stock levels + movement log
//!
//! Verifies:
//! - No path ever oversells or leaves partially-applied state
//! - The movement log replays to the exact stock levels
//! - Lifecycle preconditions and failure payloads

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use depot_catalog::{InMemoryCatalog, Product, Warehouse};
    use depot_core::{DomainError, OrderId, PageRequest};
    use depot_ledger::{ItemRequest, MovementFilter, ReferenceKind, StockKey};
    use depot_orders::{LedgerStore, OrderEngine, OrderFilter, OrderStatus, StockService};

    use crate::memory::InMemoryLedgerStore;

    type Engine = OrderEngine<Arc<InMemoryLedgerStore>, Arc<InMemoryCatalog>>;
    type Stocks = StockService<Arc<InMemoryLedgerStore>, Arc<InMemoryCatalog>>;

    struct Fixture {
        store: Arc<InMemoryLedgerStore>,
        catalog: Arc<InMemoryCatalog>,
        engine: Engine,
        stocks: Stocks,
        warehouse: Warehouse,
    }

    fn setup() -> Fixture {
        let store = Arc::new(InMemoryLedgerStore::new());
        let catalog = Arc::new(InMemoryCatalog::new());
        let engine = OrderEngine::new(store.clone(), catalog.clone());
        let stocks = StockService::new(store.clone(), catalog.clone());
        let warehouse = catalog.add_warehouse("Central");
        Fixture {
            store,
            catalog,
            engine,
            stocks,
            warehouse,
        }
    }

    impl Fixture {
        fn product_with_stock(&self, name: &str, initial: i64) -> Product {
            let product = self.catalog.add_product(name, 1000);
            if initial > 0 {
                self.stocks
                    .load_initial(product.id, self.warehouse.id, initial, Some("seed"))
                    .unwrap();
            }
            product
        }

        fn on_hand(&self, product: &Product) -> i64 {
            self.store
                .on_hand(StockKey::new(product.id, self.warehouse.id))
                .unwrap()
        }

        fn movements_for(&self, product: &Product) -> Vec<depot_ledger::MovementRecord> {
            let filter = MovementFilter {
                product_id: Some(product.id),
                ..MovementFilter::default()
            };
            self.store
                .list_movements(&filter, PageRequest::new(1, 100))
                .unwrap()
                .items
        }
    }

    fn item(product: &Product, count: i64) -> ItemRequest {
        ItemRequest {
            product_id: product.id,
            count,
        }
    }

    #[test]
    fn create_order_reserves_stock_and_records_movement() {
        let fx = setup();
        let product = fx.product_with_stock("Bolt", 10);

        let order = fx
            .engine
            .create_order("Acme", fx.warehouse.id, vec![item(&product, 4)])
            .unwrap();

        assert_eq!(order.status, OrderStatus::Active);
        assert_eq!(fx.on_hand(&product), 6);

        let movements = fx.movements_for(&product);
        // Newest first: the creation reduction, then the initial load.
        assert_eq!(movements.len(), 2);
        assert_eq!(movements[0].quantity, -4);
        assert_eq!(movements[0].balance_after, 6);
        assert_eq!(movements[0].kind, ReferenceKind::OrderCreation);
        assert_eq!(movements[0].reference, Some(order.id));
        assert_eq!(movements[1].kind, ReferenceKind::InitialLoad);
    }

    #[test]
    fn create_with_any_shortfall_creates_nothing_at_all() {
        let fx = setup();
        let p1 = fx.product_with_stock("Bolt", 10);
        let p2 = fx.product_with_stock("Nut", 2);

        let err = fx
            .engine
            .create_order("Acme", fx.warehouse.id, vec![item(&p1, 5), item(&p2, 3)])
            .unwrap_err();

        match err {
            DomainError::InsufficientStock(shortfalls) => {
                assert_eq!(shortfalls.len(), 1);
                assert_eq!(shortfalls[0].product_id, p2.id);
                assert_eq!(shortfalls[0].product_name, "Nut");
                assert_eq!(shortfalls[0].requested, 3);
                assert_eq!(shortfalls[0].available, 2);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }

        // Nothing applied: stock untouched, no order, no extra movements.
        assert_eq!(fx.on_hand(&p1), 10);
        assert_eq!(fx.on_hand(&p2), 2);
        let orders = fx
            .store
            .list_orders(&OrderFilter::default(), PageRequest::default())
            .unwrap();
        assert_eq!(orders.total, 0);
        assert_eq!(fx.movements_for(&p1).len(), 1);
        assert_eq!(fx.movements_for(&p2).len(), 1);
    }

    #[test]
    fn concurrent_creates_cannot_oversell() {
        let fx = setup();
        let product = fx.product_with_stock("Bolt", 10);

        let engine = Arc::new(OrderEngine::new(fx.store.clone(), fx.catalog.clone()));
        let warehouse_id = fx.warehouse.id;
        let product_id = product.id;

        let mut handles = Vec::new();
        for _ in 0..2 {
            let engine = engine.clone();
            handles.push(std::thread::spawn(move || {
                engine.create_order(
                    "Racer",
                    warehouse_id,
                    vec![ItemRequest {
                        product_id,
                        count: 6,
                    }],
                )
            }));
        }

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let successes = results.iter().filter(|r| r.is_ok()).count();
        let shortfalls = results
            .iter()
            .filter(|r| matches!(r, Err(DomainError::InsufficientStock(_))))
            .count();

        assert_eq!(successes, 1);
        assert_eq!(shortfalls, 1);
        assert_eq!(fx.on_hand(&product), 4);
    }

    #[test]
    fn update_replaces_items_and_reallocates() {
        let fx = setup();
        let p1 = fx.product_with_stock("Bolt", 10);
        let p2 = fx.product_with_stock("Nut", 8);

        let order = fx
            .engine
            .create_order("Acme", fx.warehouse.id, vec![item(&p1, 5)])
            .unwrap();
        assert_eq!(fx.on_hand(&p1), 5);

        let updated = fx
            .engine
            .update_order(order.id, None, Some(vec![item(&p2, 3)]))
            .unwrap();

        assert_eq!(updated.items.len(), 1);
        assert_eq!(updated.items[0].product_id, p2.id);
        assert_eq!(fx.on_hand(&p1), 10);
        assert_eq!(fx.on_hand(&p2), 5);

        let p1_movements = fx.movements_for(&p1);
        assert_eq!(p1_movements[0].kind, ReferenceKind::OrderUpdateReturn);
        assert_eq!(p1_movements[0].quantity, 5);
        let p2_movements = fx.movements_for(&p2);
        assert_eq!(p2_movements[0].kind, ReferenceKind::OrderUpdateAllocate);
        assert_eq!(p2_movements[0].quantity, -3);
    }

    #[test]
    fn failed_update_restores_the_prior_allocation_exactly() {
        let fx = setup();
        let product = fx.product_with_stock("Bolt", 10);

        let order = fx
            .engine
            .create_order("Acme", fx.warehouse.id, vec![item(&product, 5)])
            .unwrap();
        assert_eq!(fx.on_hand(&product), 5);
        let movements_before = fx.movements_for(&product).len();

        let err = fx
            .engine
            .update_order(order.id, None, Some(vec![item(&product, 100)]))
            .unwrap_err();

        match err {
            DomainError::InsufficientStock(shortfalls) => {
                assert_eq!(shortfalls[0].requested, 100);
                // The order's own returned reservation counts as available
                // during the re-check.
                assert_eq!(shortfalls[0].available, 10);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }

        // State is exactly as before the call: same items, same stock,
        // no movements from the aborted unit.
        let reloaded = fx.store.find_order(order.id).unwrap().unwrap();
        assert_eq!(reloaded.items, order.items);
        assert_eq!(fx.on_hand(&product), 5);
        assert_eq!(fx.movements_for(&product).len(), movements_before);
    }

    #[test]
    fn update_customer_alone_moves_no_stock() {
        let fx = setup();
        let product = fx.product_with_stock("Bolt", 10);

        let order = fx
            .engine
            .create_order("Acme", fx.warehouse.id, vec![item(&product, 2)])
            .unwrap();
        let movements_before = fx.movements_for(&product).len();

        let updated = fx
            .engine
            .update_order(order.id, Some("Globex".to_string()), None)
            .unwrap();

        assert_eq!(updated.customer, "Globex");
        assert_eq!(updated.items, order.items);
        assert_eq!(fx.movements_for(&product).len(), movements_before);
    }

    #[test]
    fn complete_keeps_consumption_and_stamps_completion() {
        let fx = setup();
        let product = fx.product_with_stock("Bolt", 10);

        let order = fx
            .engine
            .create_order("Acme", fx.warehouse.id, vec![item(&product, 4)])
            .unwrap();
        let movements_before = fx.movements_for(&product).len();

        let completed = fx.engine.complete_order(order.id).unwrap();

        assert_eq!(completed.status, OrderStatus::Completed);
        assert!(completed.completed_at.is_some());
        assert_eq!(fx.on_hand(&product), 6);
        assert_eq!(fx.movements_for(&product).len(), movements_before);
    }

    #[test]
    fn cancel_then_resume_round_trips_stock() {
        let fx = setup();
        let product = fx.product_with_stock("Bolt", 10);

        let order = fx
            .engine
            .create_order("Acme", fx.warehouse.id, vec![item(&product, 4)])
            .unwrap();
        assert_eq!(fx.on_hand(&product), 6);

        let canceled = fx.engine.cancel_order(order.id).unwrap();
        assert_eq!(canceled.status, OrderStatus::Canceled);
        assert_eq!(fx.on_hand(&product), 10);

        let resumed = fx.engine.resume_order(order.id).unwrap();
        assert_eq!(resumed.status, OrderStatus::Active);
        assert_eq!(fx.on_hand(&product), 6);

        // The cancellation/resumption pair nets to zero in the log.
        let movements = fx.movements_for(&product);
        assert_eq!(movements[0].kind, ReferenceKind::OrderResumption);
        assert_eq!(movements[0].quantity, -4);
        assert_eq!(movements[1].kind, ReferenceKind::OrderCancellation);
        assert_eq!(movements[1].quantity, 4);
        assert_eq!(movements[0].quantity + movements[1].quantity, 0);
    }

    #[test]
    fn resume_fails_and_stays_canceled_when_stock_is_gone() {
        let fx = setup();
        let product = fx.product_with_stock("Bolt", 10);

        let order = fx
            .engine
            .create_order("Acme", fx.warehouse.id, vec![item(&product, 4)])
            .unwrap();
        fx.engine.cancel_order(order.id).unwrap();

        // Someone else claims the returned stock.
        fx.engine
            .create_order("Globex", fx.warehouse.id, vec![item(&product, 8)])
            .unwrap();
        assert_eq!(fx.on_hand(&product), 2);

        let err = fx.engine.resume_order(order.id).unwrap_err();
        assert!(matches!(err, DomainError::InsufficientStock(_)));

        let reloaded = fx.store.find_order(order.id).unwrap().unwrap();
        assert_eq!(reloaded.status, OrderStatus::Canceled);
        assert_eq!(fx.on_hand(&product), 2);
    }

    #[test]
    fn lifecycle_preconditions_are_enforced() {
        let fx = setup();
        let product = fx.product_with_stock("Bolt", 10);

        let order = fx
            .engine
            .create_order("Acme", fx.warehouse.id, vec![item(&product, 1)])
            .unwrap();

        // Active orders cannot be resumed.
        let err = fx.engine.resume_order(order.id).unwrap_err();
        assert!(matches!(err, DomainError::InvalidState(_)));

        fx.engine.complete_order(order.id).unwrap();

        // Completed orders are terminal.
        for result in [
            fx.engine.complete_order(order.id),
            fx.engine.cancel_order(order.id),
            fx.engine.update_order(order.id, Some("X".to_string()), None),
        ] {
            assert!(matches!(result.unwrap_err(), DomainError::InvalidState(_)));
        }
    }

    #[test]
    fn unknown_order_is_not_found() {
        let fx = setup();
        let err = fx.engine.complete_order(OrderId::new()).unwrap_err();
        assert!(matches!(err, DomainError::NotFound));
    }

    #[test]
    fn manual_adjustment_end_to_end() {
        let fx = setup();
        let product = fx.product_with_stock("Bolt", 10);

        let movement = fx
            .stocks
            .adjust_manually(product.id, fx.warehouse.id, -3, "shrinkage")
            .unwrap();

        assert_eq!(movement.quantity, -3);
        assert_eq!(movement.balance_after, 7);
        assert_eq!(movement.kind, ReferenceKind::ManualAdjustment);
        assert_eq!(movement.reference, None);
        assert_eq!(fx.on_hand(&product), 7);
    }

    #[test]
    fn manual_adjustment_zero_is_rejected() {
        let fx = setup();
        let product = fx.product_with_stock("Bolt", 10);

        let err = fx
            .stocks
            .adjust_manually(product.id, fx.warehouse.id, 0, "noop")
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(fx.movements_for(&product).len(), 1);
    }

    #[test]
    fn ledger_replay_reproduces_every_stock_level() {
        let fx = setup();
        let p1 = fx.product_with_stock("Bolt", 25);
        let p2 = fx.product_with_stock("Nut", 12);

        let order = fx
            .engine
            .create_order("Acme", fx.warehouse.id, vec![item(&p1, 5), item(&p2, 3)])
            .unwrap();
        fx.engine
            .update_order(order.id, None, Some(vec![item(&p1, 8)]))
            .unwrap();
        fx.engine.cancel_order(order.id).unwrap();
        fx.engine.resume_order(order.id).unwrap();
        fx.stocks
            .adjust_manually(p2.id, fx.warehouse.id, -4, "recount")
            .unwrap();
        // A failed operation must contribute nothing to the log.
        let _ = fx
            .engine
            .create_order("Globex", fx.warehouse.id, vec![item(&p1, 1000)])
            .unwrap_err();

        for level in fx.store.stock_levels().unwrap() {
            let filter = MovementFilter {
                product_id: Some(level.key.product_id),
                warehouse_id: Some(level.key.warehouse_id),
                ..MovementFilter::default()
            };
            let movements = fx
                .store
                .list_movements(&filter, PageRequest::new(1, 100))
                .unwrap();
            let replayed: i64 = movements.items.iter().map(|m| m.quantity).sum();
            assert_eq!(replayed, level.quantity);
            assert!(level.quantity >= 0);
        }
    }

    #[test]
    fn movement_listing_filters_and_paginates_newest_first() {
        let fx = setup();
        let product = fx.product_with_stock("Bolt", 100);

        for i in 0..5 {
            fx.stocks
                .adjust_manually(product.id, fx.warehouse.id, -1, &format!("pick {i}"))
                .unwrap();
        }

        let manual_only = MovementFilter {
            kind: Some(ReferenceKind::ManualAdjustment),
            ..MovementFilter::default()
        };
        let page = fx
            .store
            .list_movements(&manual_only, PageRequest::new(1, 2))
            .unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.items.len(), 2);
        // Newest first: the last adjustment leads.
        assert_eq!(page.items[0].description.as_deref(), Some("pick 4"));
        assert_eq!(page.items[0].balance_after, 95);

        let page2 = fx
            .store
            .list_movements(&manual_only, PageRequest::new(3, 2))
            .unwrap();
        assert_eq!(page2.items.len(), 1);
        assert_eq!(page2.items[0].description.as_deref(), Some("pick 0"));
    }

    #[test]
    fn order_listing_filters_by_status_and_customer() {
        let fx = setup();
        let product = fx.product_with_stock("Bolt", 100);

        let a = fx
            .engine
            .create_order("Acme Corp", fx.warehouse.id, vec![item(&product, 1)])
            .unwrap();
        let b = fx
            .engine
            .create_order("Globex", fx.warehouse.id, vec![item(&product, 1)])
            .unwrap();
        fx.engine.cancel_order(b.id).unwrap();

        let active = fx
            .store
            .list_orders(
                &OrderFilter {
                    status: Some(OrderStatus::Active),
                    ..OrderFilter::default()
                },
                PageRequest::default(),
            )
            .unwrap();
        assert_eq!(active.total, 1);
        assert_eq!(active.items[0].id, a.id);

        let by_customer = fx
            .store
            .list_orders(
                &OrderFilter {
                    customer_contains: Some("glob".to_string()),
                    ..OrderFilter::default()
                },
                PageRequest::default(),
            )
            .unwrap();
        assert_eq!(by_customer.total, 1);
        assert_eq!(by_customer.items[0].id, b.id);
    }

    #[test]
    fn validation_rejects_malformed_requests() {
        let fx = setup();
        let product = fx.product_with_stock("Bolt", 10);

        // Empty customer.
        let err = fx
            .engine
            .create_order("  ", fx.warehouse.id, vec![item(&product, 1)])
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        // Empty item list.
        let err = fx
            .engine
            .create_order("Acme", fx.warehouse.id, vec![])
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        // Non-positive count.
        let err = fx
            .engine
            .create_order("Acme", fx.warehouse.id, vec![item(&product, 0)])
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        // Unknown warehouse.
        let err = fx
            .engine
            .create_order(
                "Acme",
                depot_core::WarehouseId::new(),
                vec![item(&product, 1)],
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        // None of it moved stock.
        assert_eq!(fx.on_hand(&product), 10);
        assert_eq!(fx.movements_for(&product).len(), 1);
    }
}
