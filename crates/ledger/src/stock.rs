use serde::{Deserialize, Serialize};

use depot_core::{DomainError, DomainResult, OrderId, ProductId, WarehouseId};

use crate::movement::{MovementRecord, NewMovement, ReferenceKind};

/// Composite key of a stock level row.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StockKey {
    pub product_id: ProductId,
    pub warehouse_id: WarehouseId,
}

impl StockKey {
    pub fn new(product_id: ProductId, warehouse_id: WarehouseId) -> Self {
        Self {
            product_id,
            warehouse_id,
        }
    }
}

/// Current on-hand quantity for one (product, warehouse) pair.
///
/// A materialized cache of the movement log: never deleted, never negative,
/// created lazily at 0 on first movement into the pair.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    pub key: StockKey,
    pub quantity: i64,
}

/// Read access to stock levels inside (or outside) an atomic unit.
pub trait StockRead {
    /// Current quantity for `key`; an absent row reads as 0.
    fn on_hand(&self, key: StockKey) -> i64;
}

/// Write half of an atomic unit touching stock rows and the movement log.
///
/// Implementations stage writes and make them visible only when the
/// enclosing unit commits; see `depot-store`.
pub trait StockTx: StockRead {
    /// Write the new quantity for `key`, creating the row if absent.
    fn put_stock(&mut self, key: StockKey, quantity: i64);

    /// Append one movement, assigning its identity and timestamp.
    fn append_movement(&mut self, movement: NewMovement) -> MovementRecord;
}

/// Reduce stock by `count` and record the movement.
///
/// Applies unconditionally: the caller is responsible for checking
/// availability first, inside the same unit. One movement, one new balance.
pub fn reduce_stock(
    tx: &mut dyn StockTx,
    key: StockKey,
    count: i64,
    kind: ReferenceKind,
    reference: Option<OrderId>,
    description: Option<&str>,
) -> DomainResult<MovementRecord> {
    if count <= 0 {
        return Err(DomainError::validation("count must be positive"));
    }
    apply_delta(tx, key, -count, kind, reference, description)
}

/// Increase stock by `count` and record the movement.
pub fn increase_stock(
    tx: &mut dyn StockTx,
    key: StockKey,
    count: i64,
    kind: ReferenceKind,
    reference: Option<OrderId>,
    description: Option<&str>,
) -> DomainResult<MovementRecord> {
    if count <= 0 {
        return Err(DomainError::validation("count must be positive"));
    }
    apply_delta(tx, key, count, kind, reference, description)
}

/// Apply a signed manual correction (shrinkage, recount, ...).
///
/// Zero is rejected as invalid input, and a correction may not drive the
/// level negative. Kind is fixed to `manual`, no order reference.
pub fn manual_adjustment(
    tx: &mut dyn StockTx,
    key: StockKey,
    quantity: i64,
    description: &str,
) -> DomainResult<MovementRecord> {
    if quantity == 0 {
        return Err(DomainError::validation("quantity cannot be zero"));
    }
    if tx.on_hand(key) + quantity < 0 {
        return Err(DomainError::validation(
            "adjustment would drive stock negative",
        ));
    }
    apply_delta(
        tx,
        key,
        quantity,
        ReferenceKind::ManualAdjustment,
        None,
        Some(description),
    )
}

/// Record an opening balance coming from outside the system (seeding,
/// first-time import). An increase tagged `initial-load`.
pub fn load_initial_stock(
    tx: &mut dyn StockTx,
    key: StockKey,
    count: i64,
    description: Option<&str>,
) -> DomainResult<MovementRecord> {
    increase_stock(tx, key, count, ReferenceKind::InitialLoad, None, description)
}

fn apply_delta(
    tx: &mut dyn StockTx,
    key: StockKey,
    delta: i64,
    kind: ReferenceKind,
    reference: Option<OrderId>,
    description: Option<&str>,
) -> DomainResult<MovementRecord> {
    let current = tx.on_hand(key);
    let balance_after = current + delta;

    // Movement first, then the balance it produced; both staged in the
    // same unit so they commit or vanish together.
    let movement = tx.append_movement(NewMovement {
        product_id: key.product_id,
        warehouse_id: key.warehouse_id,
        quantity: delta,
        balance_after,
        kind,
        reference,
        description: description.map(str::to_owned),
    });
    tx.put_stock(key, balance_after);

    Ok(movement)
}
