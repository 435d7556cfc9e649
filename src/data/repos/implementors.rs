pub mod business_owner_repo;
pub mod business_repo;
pub mod category_repo;
pub mod order_repo;
pub mod product_repo;
pub mod review_repo;
pub mod user_repo;
