use chrono::{DateTime, Utc};
use serde::Deserialize;

use depot_catalog::Product;
use depot_core::{Page, PageRequest, ProductId, WarehouseId};
use depot_ledger::MovementRecord;
use depot_orders::Order;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct OrderItemRequest {
    pub product_id: ProductId,
    pub count: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub customer: String,
    pub warehouse_id: WarehouseId,
    pub items: Vec<OrderItemRequest>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrderRequest {
    pub customer: Option<String>,
    pub items: Option<Vec<OrderItemRequest>>,
}

#[derive(Debug, Deserialize)]
pub struct ManualAdjustmentRequest {
    pub product_id: ProductId,
    pub warehouse_id: WarehouseId,
    pub quantity: i64,
    pub description: String,
}

// -------------------------
// Query-string DTOs
// -------------------------

#[derive(Debug, Default, Deserialize)]
pub struct OrderListQuery {
    pub status: Option<String>,
    pub customer: Option<String>,
    pub warehouse_id: Option<WarehouseId>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MovementListQuery {
    pub product_id: Option<ProductId>,
    pub warehouse_id: Option<WarehouseId>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    pub reference_type: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductListQuery {
    pub warehouse_id: Option<WarehouseId>,
}

pub fn page_request(page: Option<u32>, per_page: Option<u32>) -> PageRequest {
    match (page, per_page) {
        (None, None) => PageRequest::default(),
        (p, pp) => PageRequest::new(
            p.unwrap_or(1),
            pp.unwrap_or(PageRequest::default().per_page),
        ),
    }
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn order_to_json(order: &Order, catalog: &depot_catalog::InMemoryCatalog) -> serde_json::Value {
    serde_json::json!({
        "id": order.id.to_string(),
        "customer": order.customer,
        "status": order.status.as_str(),
        "warehouse_id": order.warehouse_id.to_string(),
        "items": order.items.iter().map(|item| {
            let product = depot_catalog::Catalog::product(catalog, item.product_id);
            serde_json::json!({
                "product_id": item.product_id.to_string(),
                "count": item.count,
                "product_name": product.as_ref().map(|p| p.name.clone()),
                "price": product.as_ref().map(|p| p.price),
            })
        }).collect::<Vec<_>>(),
        "created_at": order.created_at.to_rfc3339(),
        "completed_at": order.completed_at.map(|t| t.to_rfc3339()),
    })
}

pub fn movement_to_json(record: &MovementRecord) -> serde_json::Value {
    serde_json::json!({
        "id": record.id.to_string(),
        "product_id": record.product_id.to_string(),
        "warehouse_id": record.warehouse_id.to_string(),
        "quantity": record.quantity,
        "balance_after": record.balance_after,
        "reference_type": record.kind.as_str(),
        "reference_id": record.reference.map(|id| id.to_string()),
        "description": record.description,
        "created_at": record.created_at.to_rfc3339(),
    })
}

pub fn product_to_json(
    product: &Product,
    stock: &[(WarehouseId, i64)],
) -> serde_json::Value {
    serde_json::json!({
        "id": product.id.to_string(),
        "name": product.name,
        "price": product.price,
        "stock": stock.iter().map(|(warehouse_id, quantity)| serde_json::json!({
            "warehouse_id": warehouse_id.to_string(),
            "quantity": quantity,
        })).collect::<Vec<_>>(),
    })
}

pub fn page_to_json<T>(
    page: &Page<T>,
    items: Vec<serde_json::Value>,
) -> serde_json::Value {
    serde_json::json!({
        "data": items,
        "page": page.page,
        "per_page": page.per_page,
        "total": page.total,
    })
}
