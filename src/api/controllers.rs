pub mod auth_controller;
pub mod business_controller;
pub mod category_controller;
pub mod order_controller;
pub mod product_controller;
pub mod review_controller;
pub mod user_controller;
