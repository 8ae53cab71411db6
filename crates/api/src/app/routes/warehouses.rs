use std::sync::Arc;

use axum::{extract::Extension, response::IntoResponse, Json};

use depot_catalog::Catalog;

use crate::app::services::AppServices;

pub async fn list_warehouses(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let body: Vec<_> = services
        .catalog
        .warehouses()
        .into_iter()
        .map(|warehouse| {
            serde_json::json!({
                "id": warehouse.id.to_string(),
                "name": warehouse.name,
            })
        })
        .collect();

    Json(serde_json::json!({ "data": body })).into_response()
}
