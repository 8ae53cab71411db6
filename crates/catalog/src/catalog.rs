use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use depot_core::{DomainError, DomainResult, ProductId, WarehouseId};

/// A sellable product. Immutable once registered; name/price edits are out
/// of scope for the ledger core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Price in smallest currency unit (e.g., cents).
    pub price: u64,
}

/// A stock-holding location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: WarehouseId,
    pub name: String,
}

/// Lookup seam consumed by the ledger core.
pub trait Catalog: Send + Sync {
    fn product(&self, id: ProductId) -> Option<Product>;
    fn warehouse(&self, id: WarehouseId) -> Option<Warehouse>;
    fn products(&self) -> Vec<Product>;
    fn warehouses(&self) -> Vec<Warehouse>;

    /// Lookup that promotes absence to a domain error.
    fn require_product(&self, id: ProductId) -> DomainResult<Product> {
        self.product(id)
            .ok_or_else(|| DomainError::validation(format!("unknown product: {id}")))
    }

    fn require_warehouse(&self, id: WarehouseId) -> DomainResult<Warehouse> {
        self.warehouse(id)
            .ok_or_else(|| DomainError::validation(format!("unknown warehouse: {id}")))
    }
}

impl<C> Catalog for Arc<C>
where
    C: Catalog + ?Sized,
{
    fn product(&self, id: ProductId) -> Option<Product> {
        (**self).product(id)
    }

    fn warehouse(&self, id: WarehouseId) -> Option<Warehouse> {
        (**self).warehouse(id)
    }

    fn products(&self) -> Vec<Product> {
        (**self).products()
    }

    fn warehouses(&self) -> Vec<Warehouse> {
        (**self).warehouses()
    }
}

/// In-memory catalog.
///
/// Intended for tests/dev and the seeded demo dataset. Not optimized for
/// performance.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<HashMap<ProductId, Product>>,
    warehouses: RwLock<HashMap<WarehouseId, Warehouse>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_product(&self, name: impl Into<String>, price: u64) -> Product {
        let product = Product {
            id: ProductId::new(),
            name: name.into(),
            price,
        };
        if let Ok(mut map) = self.products.write() {
            map.insert(product.id, product.clone());
        }
        product
    }

    pub fn add_warehouse(&self, name: impl Into<String>) -> Warehouse {
        let warehouse = Warehouse {
            id: WarehouseId::new(),
            name: name.into(),
        };
        if let Ok(mut map) = self.warehouses.write() {
            map.insert(warehouse.id, warehouse.clone());
        }
        warehouse
    }
}

impl Catalog for InMemoryCatalog {
    fn product(&self, id: ProductId) -> Option<Product> {
        let map = self.products.read().ok()?;
        map.get(&id).cloned()
    }

    fn warehouse(&self, id: WarehouseId) -> Option<Warehouse> {
        let map = self.warehouses.read().ok()?;
        map.get(&id).cloned()
    }

    fn products(&self) -> Vec<Product> {
        let map = match self.products.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };
        let mut all: Vec<Product> = map.values().cloned().collect();
        all.sort_by_key(|p| p.id);
        all
    }

    fn warehouses(&self) -> Vec<Warehouse> {
        let map = match self.warehouses.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };
        let mut all: Vec<Warehouse> = map.values().cloned().collect();
        all.sort_by_key(|w| w.id);
        all
    }
}
