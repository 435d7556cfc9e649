use crate::api::response::CategoryResponse;
use crate::api::state::AppState;
use crate::data::repos::implementors::category_repo::CategoryRepo;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

pub async fn get_all_categories(State(state): State<AppState>) -> impl IntoResponse {
    match CategoryRepo::new(&state.db).get_all().await {
        Ok(categories) => {
            let response: Vec<CategoryResponse> =
                categories.into_iter().map(CategoryResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            tracing::error!("Error fetching categories: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Error fetching categories" })),
            )
                .into_response()
        }
    }
}
