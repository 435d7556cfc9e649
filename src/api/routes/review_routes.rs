use crate::api::controllers::review_controller;
use crate::api::state::AppState;
use axum::Router;
use axum::routing::delete;

pub fn routes() -> Router<AppState> {
    Router::new().route("/{id}", delete(review_controller::delete_review))
}
