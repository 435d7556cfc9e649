use crate::api::errors::APIErrors;
use crate::api::request::{
    CreateProductRequest, PageQuery, ProductQuery, UpdateProductRequest, non_blank,
};
use crate::api::response::{MessageResponse, ProductEnvelope, ProductResponse};
use crate::api::state::AppState;
use crate::data::models::product::{NewProduct, ProductFilter, UpdateProduct};
use crate::security::jwt::AccessClaims;
use crate::services::product_service::ProductService;
use crate::utils::money::to_cents;
use crate::utils::validation;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

fn price_error() -> APIErrors {
    APIErrors::validation(vec!["Price must be a non-negative amount".to_string()])
}

pub async fn get_all_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<ProductResponse>>, APIErrors> {
    let (limit, offset) = PageQuery {
        limit: query.limit,
        offset: query.offset,
    }
    .resolve();

    let filter = ProductFilter {
        search: non_blank(query.search),
        category: non_blank(query.category),
        business_id: query.business_id,
        limit,
        offset,
    };

    let products = ProductService::new(&state.db).list_products(&filter).await?;

    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductResponse>, APIErrors> {
    let product = ProductService::new(&state.db).get_product(id).await?;
    Ok(Json(ProductResponse::from(product)))
}

pub async fn create_product(
    State(state): State<AppState>,
    claims: AccessClaims,
    Json(payload): Json<CreateProductRequest>,
) -> Result<impl IntoResponse, APIErrors> {
    let errors = validation::check(&payload);
    if !errors.is_empty() {
        return Err(APIErrors::validation(errors));
    }

    let price_cents = to_cents(&payload.price).ok_or_else(price_error)?;

    let product = ProductService::new(&state.db)
        .create_product(
            claims.user_id(),
            NewProduct {
                business_id: payload.business_id,
                name: payload.name.trim(),
                description: payload.description.as_deref(),
                price_cents,
                image_url: payload.image_url.as_deref(),
                category: payload.category.trim(),
                stock_quantity: payload.stock_quantity,
                is_available: payload.is_available,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ProductEnvelope {
            message: "Product created successfully".to_string(),
            product: ProductResponse::from(product),
        }),
    ))
}

pub async fn update_product(
    State(state): State<AppState>,
    claims: AccessClaims,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<ProductEnvelope>, APIErrors> {
    let errors = validation::check(&payload);
    if !errors.is_empty() {
        return Err(APIErrors::validation(errors));
    }

    let price_cents = match &payload.price {
        Some(price) => Some(to_cents(price).ok_or_else(price_error)?),
        None => None,
    };

    let changes = UpdateProduct {
        name: payload.name.as_deref().map(str::trim),
        description: payload.description.as_deref(),
        price_cents,
        image_url: payload.image_url.as_deref(),
        category: payload.category.as_deref().map(str::trim),
        stock_quantity: payload.stock_quantity,
        is_available: payload.is_available,
        is_active: None,
    };

    let product = ProductService::new(&state.db)
        .update_product(id, claims.user_id(), changes)
        .await?;

    Ok(Json(ProductEnvelope {
        message: "Product updated successfully".to_string(),
        product: ProductResponse::from(product),
    }))
}

pub async fn delete_product(
    State(state): State<AppState>,
    claims: AccessClaims,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, APIErrors> {
    ProductService::new(&state.db)
        .delete_product(id, claims.user_id())
        .await?;

    Ok(Json(MessageResponse::new("Product deleted successfully")))
}
