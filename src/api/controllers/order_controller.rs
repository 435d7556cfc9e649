use crate::api::errors::APIErrors;
use crate::api::request::{
    CancelOrderRequest, CreateOrderRequest, UpdateOrderStatusRequest, non_blank,
};
use crate::api::response::{OrderEnvelope, OrderResponse};
use crate::api::state::AppState;
use crate::security::jwt::AccessClaims;
use crate::services::errors::OrderServiceError;
use crate::services::order_service::{CreateOrderInput, OrderItemInput, OrderService};
use crate::utils::money::to_cents;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use bigdecimal::BigDecimal;

fn cents_or_reject(amount: &BigDecimal, field: &str) -> Result<i64, APIErrors> {
    to_cents(amount).ok_or_else(|| APIErrors::BadRequest(format!("Invalid {field}")))
}

/// Store failures get a message naming the action that failed.
fn reject_with(context: &'static str) -> impl FnOnce(OrderServiceError) -> APIErrors {
    move |e| match e {
        OrderServiceError::DatabaseError(e) => {
            tracing::error!("{}: {}", context, e);
            APIErrors::Internal(context.to_string())
        }
        other => APIErrors::from(other),
    }
}

/// Places an order for the caller. Prices and the total are recomputed from
/// the catalogue; client-supplied values are only compared against them.
pub async fn create_order(
    State(state): State<AppState>,
    claims: AccessClaims,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, APIErrors> {
    if let Some(user_id) = payload.user_id
        && user_id != claims.user_id()
    {
        return Err(APIErrors::Forbidden(
            "You can only place orders for yourself".to_string(),
        ));
    }

    let mut items = Vec::with_capacity(payload.items.len());
    for item in &payload.items {
        let unit_price_cents = match &item.unit_price {
            Some(price) => Some(cents_or_reject(price, "unit price")?),
            None => None,
        };
        items.push(OrderItemInput {
            product_id: item.product_id,
            quantity: item.quantity,
            unit_price_cents,
        });
    }

    let total_amount_cents = match &payload.total_amount {
        Some(total) => Some(cents_or_reject(total, "total amount")?),
        None => None,
    };

    let input = CreateOrderInput {
        user_id: claims.user_id(),
        business_id: payload.business_id,
        items,
        total_amount_cents,
        delivery_address: payload.delivery_address,
        delivery_instructions: payload.delivery_instructions,
        payment_method: payload.payment_method,
    };

    let order = OrderService::new(&state.db)
        .create_order(input)
        .await
        .map_err(reject_with("Error creating order"))?;

    Ok((
        StatusCode::CREATED,
        Json(OrderEnvelope {
            message: "Order created successfully".to_string(),
            order: OrderResponse::from(order),
        }),
    ))
}

pub async fn get_my_orders(
    State(state): State<AppState>,
    claims: AccessClaims,
) -> Result<Json<Vec<OrderResponse>>, APIErrors> {
    let orders = OrderService::new(&state.db)
        .get_user_orders(claims.user_id())
        .await?;

    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

pub async fn get_order(
    State(state): State<AppState>,
    claims: AccessClaims,
    Path(id): Path<i32>,
) -> Result<Json<OrderResponse>, APIErrors> {
    let order = OrderService::new(&state.db)
        .get_order(id, claims.user_id())
        .await?;

    Ok(Json(OrderResponse::from(order)))
}

pub async fn update_order_status(
    State(state): State<AppState>,
    claims: AccessClaims,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> Result<Json<OrderEnvelope>, APIErrors> {
    let order = OrderService::new(&state.db)
        .update_order_status(id, claims.user_id(), payload.status.trim())
        .await
        .map_err(reject_with("Error updating order status"))?;

    Ok(Json(OrderEnvelope {
        message: "Order status updated successfully".to_string(),
        order: OrderResponse::from(order),
    }))
}

pub async fn cancel_order(
    State(state): State<AppState>,
    claims: AccessClaims,
    Path(id): Path<i32>,
    Json(payload): Json<CancelOrderRequest>,
) -> Result<Json<OrderEnvelope>, APIErrors> {
    let order = OrderService::new(&state.db)
        .cancel_order(id, claims.user_id(), non_blank(payload.reason))
        .await
        .map_err(reject_with("Error cancelling order"))?;

    Ok(Json(OrderEnvelope {
        message: "Order cancelled successfully".to_string(),
        order: OrderResponse::from(order),
    }))
}
