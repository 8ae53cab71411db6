//! `depot-orders` — order lifecycle engine.
//!
//! Orders reserve stock through the ledger primitives and move through a
//! small state machine (active → completed | canceled, canceled → active).
//! Every multi-step transition runs inside one [`store::LedgerStore`]
//! atomic unit, so an order, its items, the movement log, and the stock
//! levels can never be observed partially updated.

pub mod engine;
pub mod order;
pub mod store;

pub use engine::{OrderEngine, StockService};
pub use order::{Order, OrderFilter, OrderItem, OrderStatus};
pub use store::{LedgerStore, OrderTx};
