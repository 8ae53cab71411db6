use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use depot_ledger::{MovementFilter, ReferenceKind};
use depot_orders::LedgerStore;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn list_movements(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::MovementListQuery>,
) -> axum::response::Response {
    let kind = match query.reference_type.as_deref() {
        None => None,
        Some(raw) => match raw.parse::<ReferenceKind>() {
            Ok(kind) => Some(kind),
            Err(_) => {
                return errors::json_error(
                    StatusCode::BAD_REQUEST,
                    "invalid_reference_type",
                    "unknown reference type",
                )
            }
        },
    };

    let filter = MovementFilter {
        product_id: query.product_id,
        warehouse_id: query.warehouse_id,
        date_from: query.date_from,
        date_to: query.date_to,
        kind,
    };
    let page = match services
        .store
        .list_movements(&filter, dto::page_request(query.page, query.per_page))
    {
        Ok(page) => page,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let items = page.items.iter().map(dto::movement_to_json).collect();
    Json(dto::page_to_json(&page, items)).into_response()
}

pub async fn manual_adjustment(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::ManualAdjustmentRequest>,
) -> axum::response::Response {
    match services.stocks.adjust_manually(
        body.product_id,
        body.warehouse_id,
        body.quantity,
        &body.description,
    ) {
        Ok(movement) => (
            StatusCode::CREATED,
            Json(dto::movement_to_json(&movement)),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
