use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard};

use chrono::Utc;

use depot_core::{DomainError, DomainResult, MovementId, OrderId, Page, PageRequest};
use depot_ledger::{
    MovementFilter, MovementRecord, NewMovement, StockKey, StockLevel, StockRead, StockTx,
};
use depot_orders::{LedgerStore, Order, OrderFilter, OrderTx};

#[derive(Debug, Default)]
struct StoreState {
    stocks: HashMap<StockKey, i64>,
    /// Append-only; index order is creation order.
    movements: Vec<MovementRecord>,
    orders: HashMap<OrderId, Order>,
}

/// In-memory transactional ledger store.
///
/// Each atomic unit runs under the state's exclusive write lock, so the
/// whole read-check-write window is isolated from every other unit (a
/// conservative superset of per-key locking). Writes are staged in the
/// unit and applied to the committed state only when the closure returns
/// `Ok`; an `Err` drops the staged writes on the floor.
///
/// Intended for tests/dev and embedded use. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    state: RwLock<StoreState>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read_state(&self) -> DomainResult<RwLockReadGuard<'_, StoreState>> {
        self.state
            .read()
            .map_err(|_| DomainError::storage("lock poisoned"))
    }
}

/// Staged view over the committed state for one atomic unit.
struct MemTx<'a> {
    committed: &'a StoreState,
    staged_stocks: HashMap<StockKey, i64>,
    staged_movements: Vec<MovementRecord>,
    staged_orders: HashMap<OrderId, Order>,
}

impl<'a> MemTx<'a> {
    fn new(committed: &'a StoreState) -> Self {
        Self {
            committed,
            staged_stocks: HashMap::new(),
            staged_movements: Vec::new(),
            staged_orders: HashMap::new(),
        }
    }

}

impl StockRead for MemTx<'_> {
    fn on_hand(&self, key: StockKey) -> i64 {
        self.staged_stocks
            .get(&key)
            .or_else(|| self.committed.stocks.get(&key))
            .copied()
            .unwrap_or(0)
    }
}

impl StockTx for MemTx<'_> {
    fn put_stock(&mut self, key: StockKey, quantity: i64) {
        self.staged_stocks.insert(key, quantity);
    }

    fn append_movement(&mut self, movement: NewMovement) -> MovementRecord {
        let record = MovementRecord {
            id: MovementId::new(),
            product_id: movement.product_id,
            warehouse_id: movement.warehouse_id,
            quantity: movement.quantity,
            balance_after: movement.balance_after,
            kind: movement.kind,
            reference: movement.reference,
            description: movement.description,
            created_at: Utc::now(),
        };
        self.staged_movements.push(record.clone());
        record
    }
}

impl OrderTx for MemTx<'_> {
    fn order(&self, id: OrderId) -> Option<Order> {
        self.staged_orders
            .get(&id)
            .or_else(|| self.committed.orders.get(&id))
            .cloned()
    }

    fn upsert_order(&mut self, order: Order) {
        self.staged_orders.insert(order.id, order);
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn execute<T>(
        &self,
        unit: impl FnOnce(&mut dyn OrderTx) -> DomainResult<T>,
    ) -> DomainResult<T> {
        let mut state = self
            .state
            .write()
            .map_err(|_| DomainError::storage("lock poisoned"))?;

        let mut tx = MemTx::new(&state);
        match unit(&mut tx) {
            Ok(value) => {
                let MemTx {
                    staged_stocks,
                    staged_movements,
                    staged_orders,
                    ..
                } = tx;
                for (key, quantity) in staged_stocks {
                    state.stocks.insert(key, quantity);
                }
                state.movements.extend(staged_movements);
                for (id, order) in staged_orders {
                    state.orders.insert(id, order);
                }
                Ok(value)
            }
            // Abort: staged writes are dropped with the unit.
            Err(err) => Err(err),
        }
    }

    fn find_order(&self, id: OrderId) -> DomainResult<Option<Order>> {
        let state = self.read_state()?;
        Ok(state.orders.get(&id).cloned())
    }

    fn list_orders(&self, filter: &OrderFilter, page: PageRequest) -> DomainResult<Page<Order>> {
        let state = self.read_state()?;

        let mut matches: Vec<Order> = state
            .orders
            .values()
            .filter(|order| filter.matches(order))
            .cloned()
            .collect();
        // Newest first, id as a stable tiebreaker.
        matches.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(Page::slice(matches, page))
    }

    fn on_hand(&self, key: StockKey) -> DomainResult<i64> {
        let state = self.read_state()?;
        Ok(state.stocks.get(&key).copied().unwrap_or(0))
    }

    fn stock_levels(&self) -> DomainResult<Vec<StockLevel>> {
        let state = self.read_state()?;
        let mut levels: Vec<StockLevel> = state
            .stocks
            .iter()
            .map(|(key, quantity)| StockLevel {
                key: *key,
                quantity: *quantity,
            })
            .collect();
        levels.sort_by_key(|level| level.key);
        Ok(levels)
    }

    fn list_movements(
        &self,
        filter: &MovementFilter,
        page: PageRequest,
    ) -> DomainResult<Page<MovementRecord>> {
        let state = self.read_state()?;

        // Newest first: reverse of creation (append) order.
        let matches: Vec<MovementRecord> = state
            .movements
            .iter()
            .rev()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect();
        Ok(Page::slice(matches, page))
    }
}
