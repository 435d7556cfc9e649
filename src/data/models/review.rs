use crate::data::models::business::Business;
use crate::data::models::schema::*;
use crate::data::models::user::User;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, Associations, PartialEq, Debug, Clone)]
#[diesel(table_name = reviews)]
#[diesel(belongs_to(User, foreign_key = user_id))]
#[diesel(belongs_to(Business, foreign_key = business_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Review {
    pub id: i32,
    pub user_id: i32,
    pub business_id: i32,
    pub rating: i32,
    pub comment: Option<String>,
    pub is_active: bool,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = reviews)]
pub struct NewReview<'a> {
    pub user_id: i32,
    pub business_id: i32,
    pub rating: i32,
    pub comment: Option<&'a str>,
}

#[derive(AsChangeset, PartialEq, Debug, Default)]
#[diesel(table_name = reviews)]
pub struct UpdateReview<'a> {
    pub rating: Option<i32>,
    pub comment: Option<&'a str>,
    pub is_active: Option<bool>,
}
