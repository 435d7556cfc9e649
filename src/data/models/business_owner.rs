use crate::data::models::schema::*;
use crate::data::models::user::User;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, Associations, PartialEq, Debug, Clone)]
#[diesel(table_name = business_owners)]
#[diesel(belongs_to(User, foreign_key = user_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BusinessOwner {
    pub id: i32,
    pub user_id: i32,
    pub business_license_number: Option<String>,
    pub verification_documents: Option<String>,
    pub is_verified: bool,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = business_owners)]
pub struct NewBusinessOwner<'a> {
    pub user_id: i32,
    pub business_license_number: Option<&'a str>,
    pub verification_documents: Option<&'a str>,
}
