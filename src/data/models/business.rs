use crate::data::models::business_owner::BusinessOwner;
use crate::data::models::review::Review;
use crate::data::models::schema::*;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, Associations, PartialEq, Debug, Clone)]
#[diesel(table_name = businesses)]
#[diesel(belongs_to(BusinessOwner, foreign_key = owner_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Business {
    pub id: i32,
    pub owner_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub location: String,
    pub contact_number: String,
    pub whatsapp_link: Option<String>,
    pub instagram_handle: Option<String>,
    pub logo_url: Option<String>,
    pub is_verified: bool,
    pub is_active: bool,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = businesses)]
pub struct NewBusiness<'a> {
    pub owner_id: i32,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub category: &'a str,
    pub location: &'a str,
    pub contact_number: &'a str,
    pub whatsapp_link: Option<&'a str>,
    pub instagram_handle: Option<&'a str>,
    pub logo_url: Option<&'a str>,
}

#[derive(AsChangeset, PartialEq, Debug, Default)]
#[diesel(table_name = businesses)]
pub struct UpdateBusiness<'a> {
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub category: Option<&'a str>,
    pub location: Option<&'a str>,
    pub contact_number: Option<&'a str>,
    pub whatsapp_link: Option<&'a str>,
    pub instagram_handle: Option<&'a str>,
    pub logo_url: Option<&'a str>,
    pub is_active: Option<bool>,
}

impl UpdateBusiness<'_> {
    pub fn is_empty(&self) -> bool {
        *self == UpdateBusiness::default()
    }
}

/// Search and paging knobs for business listings.
#[derive(Debug, Clone, Default)]
pub struct BusinessFilter {
    pub category: Option<String>,
    pub location: Option<String>,
    pub search: Option<String>,
    pub owner_id: Option<i32>,
    pub limit: i64,
    pub offset: i64,
}

/// A business row joined with its owner's user id and the counts shown on
/// listing cards. Only active products and reviews are counted.
#[derive(Debug, Clone, PartialEq)]
pub struct BusinessSummary {
    pub business: Business,
    pub owner_user_id: i32,
    pub product_count: i64,
    pub review_count: i64,
    pub average_rating: Option<f64>,
}

/// Name fields of the account behind a business.
#[derive(Queryable, Debug, Clone, PartialEq)]
pub struct OwnerName {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

/// Everything the business page shows: the summary, who runs it, and the
/// latest reviews with their authors' usernames.
#[derive(Debug, Clone, PartialEq)]
pub struct BusinessDetail {
    pub summary: BusinessSummary,
    pub owner: OwnerName,
    pub recent_reviews: Vec<(Review, String)>,
}
