//! HTTP API application wiring (Axum router + service wiring).
//!
//! This folder is structured like:
//! - `services.rs`: service wiring (store, catalog, engine, demo seeding)
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(seed_demo: bool) -> Router {
    build_app_with(Arc::new(services::build_services(seed_demo)))
}

/// Build the router around existing services (tests wire their own data).
pub fn build_app_with(services: Arc<services::AppServices>) -> Router {
    let v1 = routes::router().layer(Extension(services));

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/v1", v1)
        .layer(ServiceBuilder::new())
}
