use crate::data::models::schema::*;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub index_number: String,
    pub hall_of_residence: String,
    pub department: String,
    pub phone_number: String,
    pub profile_picture_url: Option<String>,
    pub account_type: String,
    pub is_verified: bool,
    pub is_active: bool,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = users)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub index_number: &'a str,
    pub hall_of_residence: &'a str,
    pub department: &'a str,
    pub phone_number: &'a str,
    pub account_type: &'a str,
}

/// Profile fields a user may change about themselves. `None` leaves the
/// column untouched.
#[derive(AsChangeset, PartialEq, Debug, Default)]
#[diesel(table_name = users)]
pub struct UpdateUser<'a> {
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub hall_of_residence: Option<&'a str>,
    pub department: Option<&'a str>,
    pub phone_number: Option<&'a str>,
    pub profile_picture_url: Option<&'a str>,
    pub password_hash: Option<&'a str>,
    pub account_type: Option<&'a str>,
    pub is_active: Option<bool>,
}

impl UpdateUser<'_> {
    pub fn is_empty(&self) -> bool {
        *self == UpdateUser::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountType {
    User,
    BusinessOwner,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::User => "user",
            AccountType::BusinessOwner => "business_owner",
        }
    }
}

impl std::str::FromStr for AccountType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(AccountType::User),
            "business_owner" => Ok(AccountType::BusinessOwner),
            _ => Err(()),
        }
    }
}
