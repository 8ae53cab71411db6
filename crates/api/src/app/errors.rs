use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use depot_core::DomainError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::InsufficientStock(shortfalls) => {
            let details: Vec<_> = shortfalls
                .iter()
                .map(|s| {
                    json!({
                        "product_id": s.product_id.to_string(),
                        "product_name": s.product_name,
                        "requested": s.requested,
                        "available": s.available,
                    })
                })
                .collect();
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                axum::Json(json!({
                    "error": "insufficient_stock",
                    "message": "insufficient stock for one or more products",
                    "shortfalls": details,
                })),
            )
                .into_response()
        }
        DomainError::InvalidState(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invalid_state", msg)
        }
        DomainError::Validation(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "validation_error", msg)
        }
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::Storage(msg) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", msg)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
