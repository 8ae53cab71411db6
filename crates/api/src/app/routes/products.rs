use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    response::IntoResponse,
    Json,
};

use depot_catalog::Catalog;
use depot_ledger::StockKey;
use depot_orders::LedgerStore;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

/// List products with their on-hand quantity per warehouse. An optional
/// `warehouse_id` narrows the stock breakdown to one location.
pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::ProductListQuery>,
) -> axum::response::Response {
    let warehouses: Vec<_> = match query.warehouse_id {
        Some(id) => services.catalog.warehouses()
            .into_iter()
            .filter(|w| w.id == id)
            .collect(),
        None => services.catalog.warehouses(),
    };

    let mut body = Vec::new();
    for product in services.catalog.products() {
        let mut stock = Vec::with_capacity(warehouses.len());
        for warehouse in &warehouses {
            match services
                .store
                .on_hand(StockKey::new(product.id, warehouse.id))
            {
                Ok(on_hand) => stock.push((warehouse.id, on_hand)),
                Err(e) => return errors::domain_error_to_response(e),
            }
        }
        body.push(dto::product_to_json(&product, &stock));
    }

    Json(serde_json::json!({ "data": body })).into_response()
}
