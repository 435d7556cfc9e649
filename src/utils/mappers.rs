use crate::api::request::{
    CreateBusinessRequest, UpdateBusinessRequest, UpdateProfileRequest,
};
use crate::api::response::{
    BusinessDetailResponse, BusinessOwnerResponse, BusinessResponse, CategoryResponse,
    OrderItemResponse, OrderResponse, ProductResponse, PublicUserResponse, ReviewResponse,
    UserResponse,
};
use crate::data::models::business::{
    BusinessDetail, BusinessSummary, NewBusiness, UpdateBusiness,
};
use crate::data::models::business_owner::BusinessOwner;
use crate::data::models::category::Category;
use crate::data::models::order::OrderDetail;
use crate::data::models::order_item::OrderItemDetail;
use crate::data::models::product::ProductListing;
use crate::data::models::review::Review;
use crate::data::models::user::{UpdateUser, User};
use crate::utils::money::from_cents;

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            index_number: user.index_number,
            hall_of_residence: user.hall_of_residence,
            department: user.department,
            phone_number: user.phone_number,
            profile_picture_url: user.profile_picture_url,
            account_type: user.account_type,
            is_verified: user.is_verified,
            created_at: user.created_at,
        }
    }
}

impl From<User> for PublicUserResponse {
    fn from(user: User) -> Self {
        PublicUserResponse {
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            department: user.department,
            profile_picture_url: user.profile_picture_url,
            account_type: user.account_type,
            created_at: user.created_at,
        }
    }
}

impl From<BusinessOwner> for BusinessOwnerResponse {
    fn from(owner: BusinessOwner) -> Self {
        BusinessOwnerResponse {
            id: owner.id,
            user_id: owner.user_id,
            business_license_number: owner.business_license_number,
            is_verified: owner.is_verified,
            created_at: owner.created_at,
        }
    }
}

impl BusinessResponse {
    /// `viewer` is the signed-in caller, if any; it decides `is_owner`.
    pub fn from_summary(summary: BusinessSummary, viewer: Option<i32>) -> Self {
        let BusinessSummary {
            business,
            owner_user_id,
            product_count,
            review_count,
            average_rating,
        } = summary;

        BusinessResponse {
            id: business.id,
            owner_id: business.owner_id,
            name: business.name,
            description: business.description,
            category: business.category,
            location: business.location,
            contact_number: business.contact_number,
            whatsapp_link: business.whatsapp_link,
            instagram_handle: business.instagram_handle,
            logo_url: business.logo_url,
            is_verified: business.is_verified,
            product_count,
            review_count,
            average_rating: average_rating.map(|avg| (avg * 10.0).round() / 10.0),
            is_owner: viewer.map(|user_id| user_id == owner_user_id),
            created_at: business.created_at,
            updated_at: business.updated_at,
        }
    }
}

impl BusinessDetailResponse {
    pub fn from_detail(detail: BusinessDetail, viewer: Option<i32>) -> Self {
        BusinessDetailResponse {
            business: BusinessResponse::from_summary(detail.summary, viewer),
            owner_username: detail.owner.username,
            owner_first_name: detail.owner.first_name,
            owner_last_name: detail.owner.last_name,
            recent_reviews: detail
                .recent_reviews
                .into_iter()
                .map(ReviewResponse::from)
                .collect(),
        }
    }
}

impl From<ProductListing> for ProductResponse {
    fn from(listing: ProductListing) -> Self {
        let product = listing.product;

        ProductResponse {
            id: product.id,
            business_id: product.business_id,
            business_name: listing.business_name,
            business_location: listing.business_location,
            name: product.name,
            description: product.description,
            price: from_cents(product.price_cents),
            image_url: product.image_url,
            category: product.category,
            stock_quantity: product.stock_quantity,
            is_available: product.is_available,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

impl From<OrderItemDetail> for OrderItemResponse {
    fn from(detail: OrderItemDetail) -> Self {
        OrderItemResponse {
            id: detail.item.id,
            product_id: detail.item.product_id,
            product_name: detail.product_name,
            product_image: detail.product_image,
            quantity: detail.item.quantity,
            unit_price: from_cents(detail.item.unit_price_cents),
            line_total: from_cents(detail.item.line_total_cents()),
        }
    }
}

impl From<OrderDetail> for OrderResponse {
    fn from(detail: OrderDetail) -> Self {
        let order = detail.order;

        OrderResponse {
            id: order.id,
            user_id: order.user_id,
            business_id: order.business_id,
            business_name: detail.business_name,
            buyer_first_name: detail.buyer_first_name,
            buyer_last_name: detail.buyer_last_name,
            total_amount: from_cents(order.total_amount_cents),
            delivery_address: order.delivery_address,
            delivery_instructions: order.delivery_instructions,
            payment_method: order.payment_method,
            status: order.status,
            cancellation_reason: order.cancellation_reason,
            items: detail.items.into_iter().map(OrderItemResponse::from).collect(),
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

impl From<(Review, String)> for ReviewResponse {
    fn from((review, username): (Review, String)) -> Self {
        ReviewResponse {
            id: review.id,
            user_id: review.user_id,
            business_id: review.business_id,
            username,
            rating: review.rating,
            comment: review.comment,
            created_at: review.created_at,
        }
    }
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        CategoryResponse {
            id: category.id,
            name: category.name,
            description: category.description,
            icon_class: category.icon_class,
        }
    }
}

impl<'a> From<&'a UpdateProfileRequest> for UpdateUser<'a> {
    fn from(dto: &'a UpdateProfileRequest) -> Self {
        UpdateUser {
            first_name: dto.first_name.as_deref().map(str::trim),
            last_name: dto.last_name.as_deref().map(str::trim),
            hall_of_residence: dto.hall_of_residence.as_deref().map(str::trim),
            department: dto.department.as_deref().map(str::trim),
            phone_number: dto.phone_number.as_deref().map(str::trim),
            profile_picture_url: dto.profile_picture_url.as_deref(),
            ..Default::default()
        }
    }
}

/// `owner_id` is left at zero; `BusinessService::create_business` fills it in.
impl<'a> From<&'a CreateBusinessRequest> for NewBusiness<'a> {
    fn from(dto: &'a CreateBusinessRequest) -> Self {
        NewBusiness {
            owner_id: 0,
            name: dto.name.trim(),
            description: dto.description.as_deref(),
            category: dto.category.trim(),
            location: dto.location.trim(),
            contact_number: dto.contact_number.trim(),
            whatsapp_link: dto.whatsapp_link.as_deref(),
            instagram_handle: dto.instagram_handle.as_deref(),
            logo_url: dto.logo_url.as_deref(),
        }
    }
}

impl<'a> From<&'a UpdateBusinessRequest> for UpdateBusiness<'a> {
    fn from(dto: &'a UpdateBusinessRequest) -> Self {
        UpdateBusiness {
            name: dto.name.as_deref().map(str::trim),
            description: dto.description.as_deref(),
            category: dto.category.as_deref().map(str::trim),
            location: dto.location.as_deref().map(str::trim),
            contact_number: dto.contact_number.as_deref().map(str::trim),
            whatsapp_link: dto.whatsapp_link.as_deref(),
            instagram_handle: dto.instagram_handle.as_deref(),
            logo_url: dto.logo_url.as_deref(),
            is_active: None,
        }
    }
}
