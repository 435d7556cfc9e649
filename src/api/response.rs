use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub index_number: String,
    pub hall_of_residence: String,
    pub department: String,
    pub phone_number: String,
    pub profile_picture_url: Option<String>,
    pub account_type: String,
    pub is_verified: bool,
    pub created_at: NaiveDateTime,
}

/// Public view of another user: no contact details.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PublicUserResponse {
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub department: String,
    pub profile_picture_url: Option<String>,
    pub account_type: String,
    pub created_at: NaiveDateTime,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserResponse,
    pub token: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserEnvelope {
    pub message: String,
    pub user: UserResponse,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct VerifyResponse {
    pub valid: bool,
    pub user: UserResponse,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BusinessOwnerResponse {
    pub id: i32,
    pub user_id: i32,
    pub business_license_number: Option<String>,
    pub is_verified: bool,
    pub created_at: NaiveDateTime,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BusinessResponse {
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
    pub product_count: i64,
    pub review_count: i64,
    pub average_rating: Option<f64>,
    /// Present only when the caller is signed in.
    pub is_owner: Option<bool>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// The business page: the listing fields plus who runs it and what buyers
/// said most recently.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BusinessDetailResponse {
    #[serde(flatten)]
    pub business: BusinessResponse,
    pub owner_username: String,
    pub owner_first_name: String,
    pub owner_last_name: String,
    pub recent_reviews: Vec<ReviewResponse>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BusinessEnvelope {
    pub message: String,
    pub business: BusinessResponse,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ProductResponse {
    pub id: i32,
    pub business_id: i32,
    pub business_name: String,
    pub business_location: String,
    pub name: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub image_url: Option<String>,
    pub category: String,
    pub stock_quantity: i32,
    pub is_available: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ProductEnvelope {
    pub message: String,
    pub product: ProductResponse,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OrderItemResponse {
    pub id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub product_image: Option<String>,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub line_total: BigDecimal,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OrderResponse {
    pub id: i32,
    pub user_id: i32,
    pub business_id: i32,
    pub business_name: String,
    pub buyer_first_name: String,
    pub buyer_last_name: String,
    pub total_amount: BigDecimal,
    pub delivery_address: String,
    pub delivery_instructions: Option<String>,
    pub payment_method: String,
    pub status: String,
    pub cancellation_reason: Option<String>,
    pub items: Vec<OrderItemResponse>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OrderEnvelope {
    pub message: String,
    pub order: OrderResponse,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ReviewResponse {
    pub id: i32,
    pub user_id: i32,
    pub business_id: i32,
    pub username: String,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ReviewEnvelope {
    pub message: String,
    pub review: ReviewResponse,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub icon_class: Option<String>,
}
