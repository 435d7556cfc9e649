use crate::api::controllers::business_controller;
use crate::api::state::AppState;
use axum::Router;
use axum::routing::get;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(business_controller::get_all_businesses).post(business_controller::create_business),
        )
        .route(
            "/{id}",
            get(business_controller::get_business)
                .put(business_controller::update_business)
                .delete(business_controller::delete_business),
        )
        .route("/{id}/products", get(business_controller::get_business_products))
        .route("/{id}/orders", get(business_controller::get_business_orders))
        .route(
            "/{id}/reviews",
            get(business_controller::get_business_reviews)
                .post(business_controller::create_business_review),
        )
}
