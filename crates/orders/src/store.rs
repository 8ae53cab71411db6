use std::sync::Arc;

use depot_core::{DomainResult, OrderId, Page, PageRequest};
use depot_ledger::{MovementFilter, MovementRecord, StockKey, StockLevel, StockTx};

use crate::order::{Order, OrderFilter};

/// One atomic unit over stock rows, the movement log, and orders.
///
/// Everything written through the unit becomes visible only if the
/// enclosing [`LedgerStore::execute`] closure returns `Ok`; on `Err` the
/// staged writes are discarded and nothing at all is applied.
pub trait OrderTx: StockTx {
    fn order(&self, id: OrderId) -> Option<Order>;
    fn upsert_order(&mut self, order: Order);
}

/// Durable keyed storage for stock levels, the append-only movement log,
/// and orders.
///
/// `execute` is the only write path and must be isolated: while one unit
/// runs its read-check-write sequence, no other unit may interleave writes
/// on the same keys (the in-memory implementation holds an exclusive lock
/// for the whole unit). The remaining methods are read-only queries over
/// committed state.
pub trait LedgerStore: Send + Sync {
    fn execute<T>(
        &self,
        unit: impl FnOnce(&mut dyn OrderTx) -> DomainResult<T>,
    ) -> DomainResult<T>;

    /// Queries fail with `DomainError::Storage` when the store itself is
    /// unusable, never by misreporting state as absent or zero.
    fn find_order(&self, id: OrderId) -> DomainResult<Option<Order>>;
    fn list_orders(&self, filter: &OrderFilter, page: PageRequest) -> DomainResult<Page<Order>>;
    fn on_hand(&self, key: StockKey) -> DomainResult<i64>;
    fn stock_levels(&self) -> DomainResult<Vec<StockLevel>>;
    /// Movements matching `filter`, newest first.
    fn list_movements(
        &self,
        filter: &MovementFilter,
        page: PageRequest,
    ) -> DomainResult<Page<MovementRecord>>;
}

impl<S> LedgerStore for Arc<S>
where
    S: LedgerStore,
{
    fn execute<T>(
        &self,
        unit: impl FnOnce(&mut dyn OrderTx) -> DomainResult<T>,
    ) -> DomainResult<T> {
        (**self).execute(unit)
    }

    fn find_order(&self, id: OrderId) -> DomainResult<Option<Order>> {
        (**self).find_order(id)
    }

    fn list_orders(&self, filter: &OrderFilter, page: PageRequest) -> DomainResult<Page<Order>> {
        (**self).list_orders(filter, page)
    }

    fn on_hand(&self, key: StockKey) -> DomainResult<i64> {
        (**self).on_hand(key)
    }

    fn stock_levels(&self) -> DomainResult<Vec<StockLevel>> {
        (**self).stock_levels()
    }

    fn list_movements(
        &self,
        filter: &MovementFilter,
        page: PageRequest,
    ) -> DomainResult<Page<MovementRecord>> {
        (**self).list_movements(filter, page)
    }
}
