use axum::{
    routing::{get, patch, post},
    Router,
};

pub mod movements;
pub mod orders;
pub mod products;
pub mod system;
pub mod warehouses;

/// Router for all `/v1` endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/warehouses", get(warehouses::list_warehouses))
        .route("/products", get(products::list_products))
        .route("/orders", get(orders::list_orders).post(orders::create_order))
        .route(
            "/orders/:id",
            get(orders::get_order).patch(orders::update_order),
        )
        .route("/orders/:id/complete", patch(orders::complete_order))
        .route("/orders/:id/cancel", patch(orders::cancel_order))
        .route("/orders/:id/resume", patch(orders::resume_order))
        .route("/stock-movements", get(movements::list_movements))
        .route("/manual-adjustment", post(movements::manual_adjustment))
}
