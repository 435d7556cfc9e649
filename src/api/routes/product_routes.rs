use crate::api::controllers::product_controller;
use crate::api::state::AppState;
use axum::Router;
use axum::routing::{delete, get, post, put};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(product_controller::get_all_products))
        .route("/", post(product_controller::create_product))
        .route("/{id}", get(product_controller::get_product))
        .route("/{id}", put(product_controller::update_product))
        .route("/{id}", delete(product_controller::delete_product))
}
