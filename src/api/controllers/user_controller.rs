use crate::api::errors::APIErrors;
use crate::api::request::{BecomeBusinessOwnerRequest, PageQuery, UpdateProfileRequest};
use crate::api::response::{
    BusinessOwnerResponse, BusinessResponse, MessageResponse, OrderResponse, PublicUserResponse,
    UserEnvelope, UserResponse,
};
use crate::api::state::AppState;
use crate::data::models::business::BusinessFilter;
use crate::data::models::user::UpdateUser;
use crate::security::jwt::AccessClaims;
use crate::services::business_service::BusinessService;
use crate::services::order_service::OrderService;
use crate::services::user_service::UserService;
use crate::utils::validation;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

const MAX_OWNED_BUSINESSES: i64 = 100;

pub async fn get_all_users(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<PublicUserResponse>>, APIErrors> {
    let (limit, offset) = page.resolve();

    let users = UserService::new(&state.db).list_users(limit, offset).await?;

    Ok(Json(users.into_iter().map(PublicUserResponse::from).collect()))
}

/// Full profile for the account holder, public fields for anyone else.
pub async fn get_user(
    State(state): State<AppState>,
    claims: AccessClaims,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, APIErrors> {
    let user = UserService::new(&state.db).get_user(id).await?;

    if claims.user_id() == id {
        Ok(Json(UserResponse::from(user)).into_response())
    } else {
        Ok(Json(PublicUserResponse::from(user)).into_response())
    }
}

pub async fn update_user(
    State(state): State<AppState>,
    claims: AccessClaims,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<UserEnvelope>, APIErrors> {
    let errors = validation::check(&payload);
    if !errors.is_empty() {
        return Err(APIErrors::validation(errors));
    }

    let user = UserService::new(&state.db)
        .update_profile(id, claims.user_id(), UpdateUser::from(&payload))
        .await?;

    Ok(Json(UserEnvelope {
        message: "User updated successfully".to_string(),
        user: UserResponse::from(user),
    }))
}

pub async fn delete_user(
    State(state): State<AppState>,
    claims: AccessClaims,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, APIErrors> {
    UserService::new(&state.db)
        .deactivate(id, claims.user_id())
        .await?;

    Ok(Json(MessageResponse::new("User deleted successfully")))
}

pub async fn get_user_businesses(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<BusinessResponse>>, APIErrors> {
    let filter = BusinessFilter {
        owner_id: Some(id),
        limit: MAX_OWNED_BUSINESSES,
        ..Default::default()
    };

    let businesses = BusinessService::new(&state.db)
        .list_businesses(&filter)
        .await?;

    Ok(Json(
        businesses
            .into_iter()
            .map(|summary| BusinessResponse::from_summary(summary, None))
            .collect(),
    ))
}

pub async fn get_user_orders(
    State(state): State<AppState>,
    claims: AccessClaims,
    Path(id): Path<i32>,
) -> Result<Json<Vec<OrderResponse>>, APIErrors> {
    if claims.user_id() != id {
        return Err(APIErrors::Forbidden(
            "You can only view your own orders".to_string(),
        ));
    }

    let orders = OrderService::new(&state.db).get_user_orders(id).await?;

    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

pub async fn become_business_owner(
    State(state): State<AppState>,
    claims: AccessClaims,
    Json(payload): Json<BecomeBusinessOwnerRequest>,
) -> Result<impl IntoResponse, APIErrors> {
    let owner = UserService::new(&state.db)
        .become_business_owner(claims.user_id(), payload.business_license_number.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(BusinessOwnerResponse::from(owner))))
}
