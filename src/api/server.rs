use crate::api::routes::{
    auth_routes, business_routes, category_routes, order_routes, product_routes, review_routes,
    user_routes,
};
use crate::api::state::AppState;
use anyhow::Context;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

fn cors_layer(origin: &str) -> anyhow::Result<CorsLayer> {
    let origin = HeaderValue::from_str(origin)
        .with_context(|| format!("CORS_ORIGIN is not a valid header value: {origin}"))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]))
}

/// Every resource router nested under `/api`, with CORS and request tracing.
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let api = Router::new()
        .route(
            "/health",
            get(|| async { Json(serde_json::json!({ "status": "ok" })) }),
        )
        .nest("/auth", auth_routes::routes())
        .nest("/users", user_routes::routes())
        .nest("/businesses", business_routes::routes())
        .nest("/products", product_routes::routes())
        .nest("/orders", order_routes::routes())
        .nest("/reviews", review_routes::routes())
        .nest("/categories", category_routes::routes());

    let cors = cors_layer(&state.config.cors_origin)?;

    Ok(Router::new()
        .nest("/api", api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

pub async fn serve(state: AppState) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.port));
    let router = build_router(state)?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, router)
        .await
        .context("Server terminated unexpectedly")
}
