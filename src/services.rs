pub mod business_service;
pub mod errors;
pub mod order_service;
pub mod product_service;
pub mod review_service;
pub mod user_service;
