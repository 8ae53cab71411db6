use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use depot_core::OrderId;
use depot_ledger::ItemRequest;
use depot_orders::{LedgerStore, OrderFilter, OrderStatus};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

fn parse_order_id(raw: &str) -> Result<OrderId, axum::response::Response> {
    raw.parse().map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid order id")
    })
}

fn to_item_requests(items: Vec<dto::OrderItemRequest>) -> Vec<ItemRequest> {
    items
        .into_iter()
        .map(|item| ItemRequest {
            product_id: item.product_id,
            count: item.count,
        })
        .collect()
}

pub async fn list_orders(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::OrderListQuery>,
) -> axum::response::Response {
    let status = match query.status.as_deref() {
        None => None,
        Some(raw) => match raw.parse::<OrderStatus>() {
            Ok(status) => Some(status),
            Err(_) => {
                return errors::json_error(
                    StatusCode::BAD_REQUEST,
                    "invalid_status",
                    "status must be one of: active, completed, canceled",
                )
            }
        },
    };

    let filter = OrderFilter {
        status,
        customer_contains: query.customer,
        warehouse_id: query.warehouse_id,
        date_from: query.date_from,
        date_to: query.date_to,
    };
    let page = match services
        .store
        .list_orders(&filter, dto::page_request(query.page, query.per_page))
    {
        Ok(page) => page,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let items = page
        .items
        .iter()
        .map(|order| dto::order_to_json(order, &services.catalog))
        .collect();
    Json(dto::page_to_json(&page, items)).into_response()
}

pub async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateOrderRequest>,
) -> axum::response::Response {
    let order = match services.orders.create_order(
        &body.customer,
        body.warehouse_id,
        to_item_requests(body.items),
    ) {
        Ok(order) => order,
        Err(e) => return errors::domain_error_to_response(e),
    };

    (
        StatusCode::CREATED,
        Json(dto::order_to_json(&order, &services.catalog)),
    )
        .into_response()
}

pub async fn get_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let order_id = match parse_order_id(&id) {
        Ok(v) => v,
        Err(response) => return response,
    };

    match services.store.find_order(order_id) {
        Ok(Some(order)) => Json(dto::order_to_json(&order, &services.catalog)).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "order not found"),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateOrderRequest>,
) -> axum::response::Response {
    let order_id = match parse_order_id(&id) {
        Ok(v) => v,
        Err(response) => return response,
    };

    let items = body.items.map(to_item_requests);
    match services.orders.update_order(order_id, body.customer, items) {
        Ok(order) => Json(dto::order_to_json(&order, &services.catalog)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn complete_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    transition(&services, &id, |s, order_id| s.orders.complete_order(order_id))
}

pub async fn cancel_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    transition(&services, &id, |s, order_id| s.orders.cancel_order(order_id))
}

pub async fn resume_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    transition(&services, &id, |s, order_id| s.orders.resume_order(order_id))
}

fn transition(
    services: &AppServices,
    raw_id: &str,
    op: impl FnOnce(&AppServices, OrderId) -> depot_core::DomainResult<depot_orders::Order>,
) -> axum::response::Response {
    let order_id = match parse_order_id(raw_id) {
        Ok(v) => v,
        Err(response) => return response,
    };

    match op(services, order_id) {
        Ok(order) => Json(dto::order_to_json(&order, &services.catalog)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
