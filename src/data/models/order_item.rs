use crate::data::models::order::Order;
use crate::data::models::product::Product;
use crate::data::models::schema::*;
use diesel::prelude::*;

/// Line item with the price captured at purchase time. Never updated.
#[derive(Queryable, Selectable, Identifiable, Associations, PartialEq, Debug, Clone)]
#[diesel(table_name = order_items)]
#[diesel(belongs_to(Order, foreign_key = order_id))]
#[diesel(belongs_to(Product, foreign_key = product_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price_cents: i64,
    pub created_at: chrono::NaiveDateTime,
}

impl OrderItem {
    pub fn line_total_cents(&self) -> i64 {
        self.unit_price_cents * i64::from(self.quantity)
    }
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = order_items)]
pub struct NewOrderItem {
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price_cents: i64,
}

/// Line item joined with the product fields shown on order pages.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemDetail {
    pub item: OrderItem,
    pub product_name: String,
    pub product_image: Option<String>,
}
