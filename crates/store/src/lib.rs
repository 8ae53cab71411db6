//! `depot-store` — ledger store implementations.
//!
//! Provides the transactional backing for the `depot-orders` seams. The
//! in-memory store is the reference implementation: exclusive lock for the
//! whole atomic unit, staged writes, commit-or-rollback on every exit path.

pub mod memory;

pub use memory::InMemoryLedgerStore;

#[cfg(test)]
mod integration_tests;
