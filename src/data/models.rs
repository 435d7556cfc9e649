pub mod business;
pub mod business_owner;
pub mod category;
pub mod order;
pub mod order_item;
pub mod product;
pub mod review;
pub mod schema;
pub mod user;
