#[tokio::main]
async fn main() {
    depot_observability::init();

    let seed_demo = std::env::var("DEPOT_SEED_DEMO")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    let app = depot_api::app::build_app(seed_demo);

    let bind_addr =
        std::env::var("DEPOT_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {bind_addr}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
