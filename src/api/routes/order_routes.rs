use crate::api::controllers::order_controller;
use crate::api::state::AppState;
use axum::Router;
use axum::routing::{get, post, put};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(order_controller::get_my_orders))
        .route("/", post(order_controller::create_order))
        .route("/{id}", get(order_controller::get_order))
        .route("/{id}/status", put(order_controller::update_order_status))
        .route("/{id}/cancel", put(order_controller::cancel_order))
}
