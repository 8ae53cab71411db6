//! `depot-catalog` — product and warehouse reference data.
//!
//! The ledger and order engine only ever need to *look up* products and
//! warehouses (names for shortfall reporting, existence for input
//! validation). That lookup seam is the [`Catalog`] trait; the in-memory
//! implementation doubles as the dev/test backing store.

pub mod catalog;

pub use catalog::{Catalog, InMemoryCatalog, Product, Warehouse};
