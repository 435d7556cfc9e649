use crate::api::controllers::user_controller;
use crate::api::state::AppState;
use axum::Router;
use axum::routing::{get, post};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(user_controller::get_all_users))
        .route("/me/business-owner", post(user_controller::become_business_owner))
        .route(
            "/{id}",
            get(user_controller::get_user)
                .put(user_controller::update_user)
                .delete(user_controller::delete_user),
        )
        .route("/{id}/businesses", get(user_controller::get_user_businesses))
        .route("/{id}/orders", get(user_controller::get_user_orders))
}
