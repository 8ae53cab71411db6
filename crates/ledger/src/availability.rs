use serde::{Deserialize, Serialize};

use depot_catalog::Catalog;
use depot_core::{DomainResult, ProductId, Shortfall, WarehouseId};

use crate::stock::{StockKey, StockRead};

/// One requested line: product and how many units of it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRequest {
    pub product_id: ProductId,
    pub count: i64,
}

/// Compute the shortfall per requested item against current stock.
///
/// Pure read: absent stock rows count as 0 and nothing is mutated, so this
/// is safe to call speculatively. An empty result means every item is
/// satisfiable. Callers that go on to reduce stock must run this inside
/// the same atomic unit as the reductions.
pub fn check_availability<S, C>(
    stocks: &S,
    catalog: &C,
    warehouse_id: WarehouseId,
    items: &[ItemRequest],
) -> DomainResult<Vec<Shortfall>>
where
    S: StockRead + ?Sized,
    C: Catalog + ?Sized,
{
    let mut shortfalls = Vec::new();

    for item in items {
        let available = stocks.on_hand(StockKey::new(item.product_id, warehouse_id));
        if available < item.count {
            let product = catalog.require_product(item.product_id)?;
            shortfalls.push(Shortfall {
                product_id: item.product_id,
                product_name: product.name,
                requested: item.count,
                available,
            });
        }
    }

    Ok(shortfalls)
}
