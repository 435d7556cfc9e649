use crate::utils::validation::{Registration, non_negative_amount, not_blank};
use bigdecimal::BigDecimal;
use serde::Deserialize;
use validator::Validate;

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

/// Sign-up form. Missing fields deserialize as empty strings so they are
/// reported by validation rather than rejected by the JSON extractor.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
    pub index_number: String,
    pub hall_of_residence: String,
    pub department: String,
    pub phone_number: String,
    pub account_type: Option<String>,
}

impl RegisterRequest {
    /// Trims every field except the passwords.
    pub fn to_registration(&self) -> Registration {
        Registration {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            index_number: self.index_number.trim().to_string(),
            hall_of_residence: self.hall_of_residence.trim().to_string(),
            department: self.department.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct LoginRequest {
    /// Username or email address.
    pub username: String,
    pub password: String,
}

#[derive(Deserialize, Debug, Default, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, message = "First name must be at least 2 characters long"))]
    pub first_name: Option<String>,
    #[validate(length(min = 2, message = "Last name must be at least 2 characters long"))]
    pub last_name: Option<String>,
    pub hall_of_residence: Option<String>,
    pub department: Option<String>,
    #[validate(length(min = 9, message = "Please provide a valid phone number"))]
    pub phone_number: Option<String>,
    #[validate(
        url(message = "Please provide a valid profile picture URL"),
        length(max = 2048, message = "Profile picture URL is too long (max 2048 characters)")
    )]
    pub profile_picture_url: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct BecomeBusinessOwnerRequest {
    pub business_license_number: Option<String>,
}

#[derive(Deserialize, Debug, Default, Validate)]
#[serde(default)]
pub struct CreateBusinessRequest {
    #[validate(
        custom(function = "not_blank", message = "Business name is required"),
        length(max = 100, message = "Business name is too long (max 100 characters)")
    )]
    pub name: String,
    #[validate(length(max = 1000, message = "Description is too long (max 1000 characters)"))]
    pub description: Option<String>,
    #[validate(
        custom(function = "not_blank", message = "Category is required"),
        length(max = 100, message = "Category is too long (max 100 characters)")
    )]
    pub category: String,
    #[validate(
        custom(function = "not_blank", message = "Location is required"),
        length(max = 100, message = "Location is too long (max 100 characters)")
    )]
    pub location: String,
    #[validate(
        custom(function = "not_blank", message = "Contact number is required"),
        length(max = 20, message = "Contact number is too long (max 20 characters)")
    )]
    pub contact_number: String,
    #[validate(url(message = "Please provide a valid WhatsApp link"))]
    pub whatsapp_link: Option<String>,
    #[validate(length(max = 100, message = "Instagram handle is too long (max 100 characters)"))]
    pub instagram_handle: Option<String>,
    #[validate(url(message = "Please provide a valid logo URL"))]
    pub logo_url: Option<String>,
}

/// Fields an owner may change on their business. Anything else in the body
/// is ignored.
#[derive(Deserialize, Debug, Default, Validate)]
pub struct UpdateBusinessRequest {
    #[validate(
        custom(function = "not_blank", message = "Business name is required"),
        length(max = 100, message = "Business name is too long (max 100 characters)")
    )]
    pub name: Option<String>,
    #[validate(length(max = 1000, message = "Description is too long (max 1000 characters)"))]
    pub description: Option<String>,
    #[validate(
        custom(function = "not_blank", message = "Category is required"),
        length(max = 100, message = "Category is too long (max 100 characters)")
    )]
    pub category: Option<String>,
    #[validate(
        custom(function = "not_blank", message = "Location is required"),
        length(max = 100, message = "Location is too long (max 100 characters)")
    )]
    pub location: Option<String>,
    #[validate(
        custom(function = "not_blank", message = "Contact number is required"),
        length(max = 20, message = "Contact number is too long (max 20 characters)")
    )]
    pub contact_number: Option<String>,
    #[validate(url(message = "Please provide a valid WhatsApp link"))]
    pub whatsapp_link: Option<String>,
    #[validate(length(max = 100, message = "Instagram handle is too long (max 100 characters)"))]
    pub instagram_handle: Option<String>,
    #[validate(url(message = "Please provide a valid logo URL"))]
    pub logo_url: Option<String>,
}

#[derive(Deserialize, Debug, Validate)]
pub struct CreateProductRequest {
    pub business_id: i32,
    #[validate(
        custom(function = "not_blank", message = "Product name is required"),
        length(max = 100, message = "Product name is too long (max 100 characters)")
    )]
    pub name: String,
    #[validate(length(max = 1000, message = "Description is too long (max 1000 characters)"))]
    pub description: Option<String>,
    #[validate(custom(function = "non_negative_amount", message = "Price must not be negative"))]
    pub price: BigDecimal,
    #[validate(url(message = "Please provide a valid image URL"))]
    pub image_url: Option<String>,
    #[validate(
        custom(function = "not_blank", message = "Category is required"),
        length(max = 100, message = "Category is too long (max 100 characters)")
    )]
    pub category: String,
    #[serde(default)]
    #[validate(range(min = 0, message = "Stock quantity must not be negative"))]
    pub stock_quantity: i32,
    #[serde(default = "default_true")]
    pub is_available: bool,
}

#[derive(Deserialize, Debug, Default, Validate)]
pub struct UpdateProductRequest {
    #[validate(
        custom(function = "not_blank", message = "Product name is required"),
        length(max = 100, message = "Product name is too long (max 100 characters)")
    )]
    pub name: Option<String>,
    #[validate(length(max = 1000, message = "Description is too long (max 1000 characters)"))]
    pub description: Option<String>,
    #[validate(custom(function = "non_negative_amount", message = "Price must not be negative"))]
    pub price: Option<BigDecimal>,
    #[validate(url(message = "Please provide a valid image URL"))]
    pub image_url: Option<String>,
    #[validate(
        custom(function = "not_blank", message = "Category is required"),
        length(max = 100, message = "Category is too long (max 100 characters)")
    )]
    pub category: Option<String>,
    #[validate(range(min = 0, message = "Stock quantity must not be negative"))]
    pub stock_quantity: Option<i32>,
    pub is_available: Option<bool>,
}

#[derive(Deserialize, Debug)]
pub struct OrderItemRequest {
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: Option<BigDecimal>,
}

#[derive(Deserialize, Debug)]
pub struct CreateOrderRequest {
    /// Optional; when present it must be the caller.
    pub user_id: Option<i32>,
    pub business_id: i32,
    #[serde(default)]
    pub items: Vec<OrderItemRequest>,
    pub total_amount: Option<BigDecimal>,
    #[serde(default)]
    pub delivery_address: String,
    pub delivery_instructions: Option<String>,
    pub payment_method: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct UpdateOrderStatusRequest {
    pub status: String,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct CancelOrderRequest {
    pub reason: Option<String>,
}

#[derive(Deserialize, Debug, Validate)]
pub struct CreateReviewRequest {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
    #[validate(length(max = 1000, message = "Comment is too long (max 1000 characters)"))]
    pub comment: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct PageQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PageQuery {
    /// Limit clamped to `1..=100`, default 20; offset never negative.
    pub fn resolve(&self) -> (i64, i64) {
        let limit = self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let offset = self.offset.unwrap_or(0).max(0);
        (limit, offset)
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct BusinessQuery {
    pub category: Option<String>,
    pub location: Option<String>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Deserialize, Debug, Default)]
pub struct ProductQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub business_id: Option<i32>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

fn default_true() -> bool {
    true
}

/// Trims an optional text field and drops it when nothing is left.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
