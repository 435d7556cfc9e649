use crate::data::models::business::Business;
use crate::data::models::schema::*;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, Associations, PartialEq, Debug, Clone)]
#[diesel(table_name = products)]
#[diesel(belongs_to(Business, foreign_key = business_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Product {
    pub id: i32,
    pub business_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub image_url: Option<String>,
    pub category: String,
    pub stock_quantity: i32,
    pub is_available: bool,
    pub is_active: bool,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = products)]
pub struct NewProduct<'a> {
    pub business_id: i32,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub price_cents: i64,
    pub image_url: Option<&'a str>,
    pub category: &'a str,
    pub stock_quantity: i32,
    pub is_available: bool,
}

#[derive(AsChangeset, PartialEq, Debug, Default)]
#[diesel(table_name = products)]
pub struct UpdateProduct<'a> {
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub price_cents: Option<i64>,
    pub image_url: Option<&'a str>,
    pub category: Option<&'a str>,
    pub stock_quantity: Option<i32>,
    pub is_available: Option<bool>,
    pub is_active: Option<bool>,
}

impl UpdateProduct<'_> {
    pub fn is_empty(&self) -> bool {
        *self == UpdateProduct::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub business_id: Option<i32>,
    pub limit: i64,
    pub offset: i64,
}

/// Product together with the name and location of the business selling it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductListing {
    pub product: Product,
    pub business_name: String,
    pub business_location: String,
}
