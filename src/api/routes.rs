pub mod auth_routes;
pub mod business_routes;
pub mod category_routes;
pub mod order_routes;
pub mod product_routes;
pub mod review_routes;
pub mod user_routes;
