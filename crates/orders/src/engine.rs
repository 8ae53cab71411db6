use chrono::Utc;

use depot_catalog::Catalog;
use depot_core::{DomainError, DomainResult, OrderId, ProductId, WarehouseId};
use depot_ledger::{
    check_availability, increase_stock, load_initial_stock, manual_adjustment, reduce_stock,
    ItemRequest, MovementRecord, ReferenceKind, StockKey,
};

use crate::order::{Order, OrderItem, OrderStatus};
use crate::store::LedgerStore;

/// Drives order state transitions, delegating all stock mutation to the
/// ledger primitives.
///
/// Every operation validates its inputs against the catalog, then runs the
/// availability check and the stock movements as a single atomic unit. An
/// operation that fails leaves orders, stock levels, and the movement log
/// exactly as they were before the call.
#[derive(Debug)]
pub struct OrderEngine<S, C> {
    store: S,
    catalog: C,
}

impl<S, C> OrderEngine<S, C>
where
    S: LedgerStore,
    C: Catalog,
{
    pub fn new(store: S, catalog: C) -> Self {
        Self { store, catalog }
    }

    /// Create an order in `active` status, reserving stock for every item.
    ///
    /// Fails with `InsufficientStock` (listing every short item) before
    /// anything is created.
    pub fn create_order(
        &self,
        customer: &str,
        warehouse_id: WarehouseId,
        items: Vec<ItemRequest>,
    ) -> DomainResult<Order> {
        let customer = normalize_customer(customer)?;
        self.catalog.require_warehouse(warehouse_id)?;
        self.validate_items(&items)?;

        let order = self.store.execute(|tx| {
            let shortfalls = check_availability(tx, &self.catalog, warehouse_id, &items)?;
            if !shortfalls.is_empty() {
                return Err(DomainError::insufficient_stock(shortfalls));
            }

            let order = Order {
                id: OrderId::new(),
                customer: customer.clone(),
                status: OrderStatus::Active,
                warehouse_id,
                items: items.iter().copied().map(OrderItem::from).collect(),
                created_at: Utc::now(),
                completed_at: None,
            };

            for item in &order.items {
                reduce_stock(
                    tx,
                    StockKey::new(item.product_id, warehouse_id),
                    item.count,
                    ReferenceKind::OrderCreation,
                    Some(order.id),
                    Some("Order creation"),
                )?;
            }

            tx.upsert_order(order.clone());
            Ok(order)
        })?;

        tracing::info!(order_id = %order.id, items = order.items.len(), "order created");
        Ok(order)
    }

    /// Update an active order's customer and/or replace its items.
    ///
    /// Item replacement returns the current reservation, re-checks the new
    /// item set, and re-reserves; if the new set cannot be satisfied the
    /// unit aborts, which restores the prior allocation untouched.
    pub fn update_order(
        &self,
        order_id: OrderId,
        customer: Option<String>,
        items: Option<Vec<ItemRequest>>,
    ) -> DomainResult<Order> {
        let customer = match customer {
            Some(c) => Some(normalize_customer(&c)?),
            None => None,
        };
        if let Some(items) = &items {
            self.validate_items(items)?;
        }

        self.store.execute(|tx| {
            let mut order = tx.order(order_id).ok_or(DomainError::NotFound)?;
            if !order.is_active() {
                return Err(DomainError::invalid_state("only active orders can be updated"));
            }

            if let Some(customer) = customer {
                order.customer = customer;
            }

            if let Some(new_items) = items {
                // Return the reservation held by the current items.
                for item in &order.items {
                    increase_stock(
                        tx,
                        StockKey::new(item.product_id, order.warehouse_id),
                        item.count,
                        ReferenceKind::OrderUpdateReturn,
                        Some(order.id),
                        Some("Order update - return stock"),
                    )?;
                }

                let shortfalls =
                    check_availability(tx, &self.catalog, order.warehouse_id, &new_items)?;
                if !shortfalls.is_empty() {
                    // Abort the unit: the staged returns above are
                    // discarded and the original allocation stands.
                    return Err(DomainError::insufficient_stock(shortfalls));
                }

                order.items = new_items.into_iter().map(OrderItem::from).collect();
                for item in &order.items {
                    reduce_stock(
                        tx,
                        StockKey::new(item.product_id, order.warehouse_id),
                        item.count,
                        ReferenceKind::OrderUpdateAllocate,
                        Some(order.id),
                        Some("Order update - allocate stock"),
                    )?;
                }
            }

            tx.upsert_order(order.clone());
            Ok(order)
        })
    }

    /// Finalize an active order. Stock stays consumed; no movements.
    pub fn complete_order(&self, order_id: OrderId) -> DomainResult<Order> {
        let order = self.store.execute(|tx| {
            let mut order = tx.order(order_id).ok_or(DomainError::NotFound)?;
            if !order.is_active() {
                return Err(DomainError::invalid_state(
                    "only active orders can be completed",
                ));
            }

            order.status = OrderStatus::Completed;
            order.completed_at = Some(Utc::now());
            tx.upsert_order(order.clone());
            Ok(order)
        })?;

        tracing::info!(order_id = %order.id, "order completed");
        Ok(order)
    }

    /// Cancel an active order, returning every item to stock.
    pub fn cancel_order(&self, order_id: OrderId) -> DomainResult<Order> {
        let order = self.store.execute(|tx| {
            let mut order = tx.order(order_id).ok_or(DomainError::NotFound)?;
            if !order.is_active() {
                return Err(DomainError::invalid_state(
                    "only active orders can be canceled",
                ));
            }

            for item in &order.items {
                increase_stock(
                    tx,
                    StockKey::new(item.product_id, order.warehouse_id),
                    item.count,
                    ReferenceKind::OrderCancellation,
                    Some(order.id),
                    Some("Order cancellation"),
                )?;
            }

            order.status = OrderStatus::Canceled;
            tx.upsert_order(order.clone());
            Ok(order)
        })?;

        tracing::info!(order_id = %order.id, "order canceled");
        Ok(order)
    }

    /// Re-activate a canceled order, re-reserving its existing items.
    ///
    /// Fails with `InsufficientStock` and leaves the order canceled if the
    /// items can no longer be covered.
    pub fn resume_order(&self, order_id: OrderId) -> DomainResult<Order> {
        let order = self.store.execute(|tx| {
            let mut order = tx.order(order_id).ok_or(DomainError::NotFound)?;
            if order.status != OrderStatus::Canceled {
                return Err(DomainError::invalid_state(
                    "only canceled orders can be resumed",
                ));
            }

            let items = order.item_requests();
            let shortfalls = check_availability(tx, &self.catalog, order.warehouse_id, &items)?;
            if !shortfalls.is_empty() {
                return Err(DomainError::insufficient_stock(shortfalls));
            }

            for item in &order.items {
                reduce_stock(
                    tx,
                    StockKey::new(item.product_id, order.warehouse_id),
                    item.count,
                    ReferenceKind::OrderResumption,
                    Some(order.id),
                    Some("Order resumption"),
                )?;
            }

            order.status = OrderStatus::Active;
            tx.upsert_order(order.clone());
            Ok(order)
        })?;

        tracing::info!(order_id = %order.id, "order resumed");
        Ok(order)
    }

    fn validate_items(&self, items: &[ItemRequest]) -> DomainResult<()> {
        if items.is_empty() {
            return Err(DomainError::validation("at least one item is required"));
        }
        for item in items {
            if item.count <= 0 {
                return Err(DomainError::validation("item count must be at least 1"));
            }
            self.catalog.require_product(item.product_id)?;
        }
        Ok(())
    }
}

fn normalize_customer(customer: &str) -> DomainResult<String> {
    let trimmed = customer.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation("customer cannot be empty"));
    }
    Ok(trimmed.to_string())
}

/// Stock operations that are not tied to an order lifecycle.
#[derive(Debug)]
pub struct StockService<S, C> {
    store: S,
    catalog: C,
}

impl<S, C> StockService<S, C>
where
    S: LedgerStore,
    C: Catalog,
{
    pub fn new(store: S, catalog: C) -> Self {
        Self { store, catalog }
    }

    /// Apply a signed manual correction and return the recorded movement.
    pub fn adjust_manually(
        &self,
        product_id: ProductId,
        warehouse_id: WarehouseId,
        quantity: i64,
        description: &str,
    ) -> DomainResult<MovementRecord> {
        self.catalog.require_product(product_id)?;
        self.catalog.require_warehouse(warehouse_id)?;
        if description.trim().is_empty() {
            return Err(DomainError::validation("description is required"));
        }

        let movement = self.store.execute(|tx| {
            manual_adjustment(
                tx,
                StockKey::new(product_id, warehouse_id),
                quantity,
                description.trim(),
            )
        })?;

        tracing::info!(
            product_id = %product_id,
            warehouse_id = %warehouse_id,
            quantity,
            "manual stock adjustment"
        );
        Ok(movement)
    }

    /// Record an opening balance for a (product, warehouse) pair.
    pub fn load_initial(
        &self,
        product_id: ProductId,
        warehouse_id: WarehouseId,
        count: i64,
        description: Option<&str>,
    ) -> DomainResult<MovementRecord> {
        self.catalog.require_product(product_id)?;
        self.catalog.require_warehouse(warehouse_id)?;

        self.store.execute(|tx| {
            load_initial_stock(
                tx,
                StockKey::new(product_id, warehouse_id),
                count,
                description,
            )
        })
    }
}
