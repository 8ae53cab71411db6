//! `depot-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;
pub mod page;

pub use error::{DomainError, DomainResult, Shortfall};
pub use id::{MovementId, OrderId, ProductId, WarehouseId};
pub use page::{Page, PageRequest};
