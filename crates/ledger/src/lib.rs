//! `depot-ledger` — the stock ledger.
//!
//! Stock for a (product, warehouse) pair is mutated exclusively through the
//! primitives in [`stock`], each of which appends exactly one immutable
//! [`MovementRecord`] alongside the new balance. The movement log is the
//! source of truth: replaying deltas in creation order reproduces the
//! current stock level.
//!
//! The primitives apply unconditionally; sufficiency policy lives above
//! them, in the order engine, which consults [`availability`] inside the
//! same atomic unit as the reductions it guards.

pub mod availability;
pub mod movement;
pub mod stock;

pub use availability::{check_availability, ItemRequest};
pub use movement::{MovementFilter, MovementRecord, NewMovement, ReferenceKind};
pub use stock::{
    increase_stock, load_initial_stock, manual_adjustment, reduce_stock, StockKey, StockLevel,
    StockRead, StockTx,
};
