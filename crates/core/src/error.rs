//! Domain error model.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::id::ProductId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// A requested-vs-available quantity gap for one item.
///
/// Carried by [`DomainError::InsufficientStock`], one entry per
/// under-stocked item, so adapters can report exactly what was short.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortfall {
    pub product_id: ProductId,
    pub product_name: String,
    pub requested: i64,
    pub available: i64,
}

/// Domain-level error.
///
/// Keep this focused on deterministic business failures (validation, state
/// preconditions, stock shortfalls). A failed operation never leaves
/// partially-applied state behind; `Storage` in particular means the atomic
/// unit did not commit and the whole operation is safe to retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. zero adjustment, non-positive count).
    #[error("validation failed: {0}")]
    Validation(String),

    /// One or more items could not be covered by current stock.
    #[error("insufficient stock for {} item(s)", .0.len())]
    InsufficientStock(Vec<Shortfall>),

    /// An order's status does not satisfy the operation's precondition.
    #[error("invalid order state: {0}")]
    InvalidState(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested resource was not found (domain-level).
    #[error("not found")]
    NotFound,

    /// The underlying atomic unit could not commit; nothing was applied.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn insufficient_stock(shortfalls: Vec<Shortfall>) -> Self {
        Self::InsufficientStock(shortfalls)
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
