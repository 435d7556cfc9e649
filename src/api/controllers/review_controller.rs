use crate::api::errors::APIErrors;
use crate::api::response::MessageResponse;
use crate::api::state::AppState;
use crate::security::jwt::AccessClaims;
use crate::services::review_service::ReviewService;
use axum::Json;
use axum::extract::{Path, State};

pub async fn delete_review(
    State(state): State<AppState>,
    claims: AccessClaims,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, APIErrors> {
    ReviewService::new(&state.db)
        .delete_review(id, claims.user_id())
        .await?;

    Ok(Json(MessageResponse::new("Review deleted successfully")))
}
