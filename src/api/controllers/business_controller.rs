use crate::api::errors::APIErrors;
use crate::api::extractors::MaybeClaims;
use crate::api::request::{
    BusinessQuery, CreateBusinessRequest, CreateReviewRequest, PageQuery, ProductQuery,
    UpdateBusinessRequest, non_blank,
};
use crate::api::response::{
    BusinessDetailResponse, BusinessEnvelope, BusinessResponse, MessageResponse, OrderResponse, ProductResponse,
    ReviewEnvelope, ReviewResponse,
};
use crate::api::state::AppState;
use crate::data::models::business::{BusinessFilter, NewBusiness, UpdateBusiness};
use crate::data::models::product::ProductFilter;
use crate::data::models::review::NewReview;
use crate::security::jwt::AccessClaims;
use crate::services::business_service::BusinessService;
use crate::services::order_service::OrderService;
use crate::services::product_service::ProductService;
use crate::services::review_service::ReviewService;
use crate::utils::validation;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// Public listing. A signed-in caller also gets `is_owner` on every row.
pub async fn get_all_businesses(
    State(state): State<AppState>,
    MaybeClaims(claims): MaybeClaims,
    Query(query): Query<BusinessQuery>,
) -> Result<Json<Vec<BusinessResponse>>, APIErrors> {
    let (limit, offset) = PageQuery {
        limit: query.limit,
        offset: query.offset,
    }
    .resolve();

    let filter = BusinessFilter {
        category: non_blank(query.category),
        location: non_blank(query.location),
        search: non_blank(query.search),
        owner_id: None,
        limit,
        offset,
    };

    let businesses = BusinessService::new(&state.db)
        .list_businesses(&filter)
        .await?;

    let viewer = claims.map(|c| c.user_id());

    Ok(Json(
        businesses
            .into_iter()
            .map(|summary| BusinessResponse::from_summary(summary, viewer))
            .collect(),
    ))
}

pub async fn get_business(
    State(state): State<AppState>,
    MaybeClaims(claims): MaybeClaims,
    Path(id): Path<i32>,
) -> Result<Json<BusinessDetailResponse>, APIErrors> {
    let business = BusinessService::new(&state.db)
        .get_business_detail(id)
        .await?;

    Ok(Json(BusinessDetailResponse::from_detail(
        business,
        claims.map(|c| c.user_id()),
    )))
}

pub async fn create_business(
    State(state): State<AppState>,
    claims: AccessClaims,
    Json(payload): Json<CreateBusinessRequest>,
) -> Result<impl IntoResponse, APIErrors> {
    let errors = validation::check(&payload);
    if !errors.is_empty() {
        return Err(APIErrors::validation(errors));
    }

    let business = BusinessService::new(&state.db)
        .create_business(claims.user_id(), NewBusiness::from(&payload))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(BusinessEnvelope {
            message: "Business created successfully".to_string(),
            business: BusinessResponse::from_summary(business, Some(claims.user_id())),
        }),
    ))
}

pub async fn update_business(
    State(state): State<AppState>,
    claims: AccessClaims,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateBusinessRequest>,
) -> Result<Json<BusinessEnvelope>, APIErrors> {
    let errors = validation::check(&payload);
    if !errors.is_empty() {
        return Err(APIErrors::validation(errors));
    }

    let business = BusinessService::new(&state.db)
        .update_business(id, claims.user_id(), UpdateBusiness::from(&payload))
        .await?;

    Ok(Json(BusinessEnvelope {
        message: "Business updated successfully".to_string(),
        business: BusinessResponse::from_summary(business, Some(claims.user_id())),
    }))
}

pub async fn delete_business(
    State(state): State<AppState>,
    claims: AccessClaims,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, APIErrors> {
    BusinessService::new(&state.db)
        .delete_business(id, claims.user_id())
        .await?;

    Ok(Json(MessageResponse::new("Business deleted successfully")))
}

pub async fn get_business_products(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<ProductResponse>>, APIErrors> {
    BusinessService::new(&state.db).get_business(id).await?;

    let (limit, offset) = PageQuery {
        limit: query.limit,
        offset: query.offset,
    }
    .resolve();

    let filter = ProductFilter {
        search: non_blank(query.search),
        category: non_blank(query.category),
        business_id: Some(id),
        limit,
        offset,
    };

    let products = ProductService::new(&state.db).list_products(&filter).await?;

    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

pub async fn get_business_orders(
    State(state): State<AppState>,
    claims: AccessClaims,
    Path(id): Path<i32>,
) -> Result<Json<Vec<OrderResponse>>, APIErrors> {
    let orders = OrderService::new(&state.db)
        .get_business_orders(id, claims.user_id())
        .await?;

    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

pub async fn get_business_reviews(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<ReviewResponse>>, APIErrors> {
    let reviews = ReviewService::new(&state.db).list_for_business(id).await?;

    Ok(Json(reviews.into_iter().map(ReviewResponse::from).collect()))
}

pub async fn create_business_review(
    State(state): State<AppState>,
    claims: AccessClaims,
    Path(id): Path<i32>,
    Json(payload): Json<CreateReviewRequest>,
) -> Result<impl IntoResponse, APIErrors> {
    let errors = validation::check(&payload);
    if !errors.is_empty() {
        return Err(APIErrors::validation(errors));
    }

    let review = ReviewService::new(&state.db)
        .add_review(NewReview {
            user_id: claims.user_id(),
            business_id: id,
            rating: payload.rating,
            comment: payload.comment.as_deref(),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ReviewEnvelope {
            message: "Review added successfully".to_string(),
            review: ReviewResponse::from((review, claims.username.clone())),
        }),
    ))
}
