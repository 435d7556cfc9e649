use crate::api::errors::APIErrors;
use crate::api::extractors::TOKEN_COOKIE;
use crate::api::request::{ChangePasswordRequest, LoginRequest, RegisterRequest, UpdateProfileRequest};
use crate::api::response::{AuthResponse, MessageResponse, UserEnvelope, UserResponse, VerifyResponse};
use crate::api::state::AppState;
use crate::data::models::user::{AccountType, UpdateUser};
use crate::security::jwt::AccessClaims;
use crate::services::user_service::UserService;
use crate::utils::validation;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};

fn token_cookie(state: &AppState, token: String) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(state.config.is_production())
        .max_age(time::Duration::minutes(state.config.jwt_expiration_minutes as i64))
        .build()
}

pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, APIErrors> {
    let account_type = match payload.account_type.as_deref() {
        None => AccountType::User,
        Some(raw) => raw
            .parse()
            .map_err(|_| APIErrors::validation(vec![format!("Unknown account type: {raw}")]))?,
    };

    let user = UserService::new(&state.db)
        .register(&payload.to_registration(), account_type)
        .await?;

    let token = state.jwt.generate_token(&user)?;

    Ok((
        StatusCode::CREATED,
        jar.add(token_cookie(&state, token.clone())),
        Json(AuthResponse {
            message: "Registration successful".to_string(),
            user: UserResponse::from(user),
            token,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, APIErrors> {
    if payload.username.trim().is_empty() || payload.password.is_empty() {
        return Err(APIErrors::BadRequest(
            "Username and password are required".to_string(),
        ));
    }

    let user = UserService::new(&state.db)
        .login(&payload.username, &payload.password)
        .await?;

    let token = state.jwt.generate_token(&user)?;

    tracing::info!("User {} logged in", user.id);

    Ok((
        jar.add(token_cookie(&state, token.clone())),
        Json(AuthResponse {
            message: "Login successful".to_string(),
            user: UserResponse::from(user),
            token,
        }),
    ))
}

pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (
        jar.remove(Cookie::build(TOKEN_COOKIE).path("/")),
        Json(MessageResponse::new("Logout successful")),
    )
}

pub async fn me(
    State(state): State<AppState>,
    claims: AccessClaims,
) -> Result<Json<UserResponse>, APIErrors> {
    let user = UserService::new(&state.db).get_user(claims.user_id()).await?;
    Ok(Json(UserResponse::from(user)))
}

pub async fn update_profile(
    State(state): State<AppState>,
    claims: AccessClaims,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<UserEnvelope>, APIErrors> {
    let errors = validation::check(&payload);
    if !errors.is_empty() {
        return Err(APIErrors::validation(errors));
    }

    let user = UserService::new(&state.db)
        .update_profile(claims.user_id(), claims.user_id(), UpdateUser::from(&payload))
        .await?;

    Ok(Json(UserEnvelope {
        message: "Profile updated successfully".to_string(),
        user: UserResponse::from(user),
    }))
}

pub async fn change_password(
    State(state): State<AppState>,
    claims: AccessClaims,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, APIErrors> {
    if payload.current_password.is_empty() || payload.new_password.is_empty() {
        return Err(APIErrors::BadRequest(
            "Current password and new password are required".to_string(),
        ));
    }

    if let Some(confirm) = &payload.confirm_password
        && confirm != &payload.new_password
    {
        return Err(APIErrors::validation(vec![
            "Password confirmation does not match".to_string(),
        ]));
    }

    UserService::new(&state.db)
        .change_password(claims.user_id(), &payload.current_password, &payload.new_password)
        .await?;

    Ok(Json(MessageResponse::new("Password changed successfully")))
}

/// Confirms the token is still good and the account still active.
pub async fn verify(
    State(state): State<AppState>,
    claims: AccessClaims,
) -> Result<Json<VerifyResponse>, APIErrors> {
    let user = UserService::new(&state.db)
        .get_user(claims.user_id())
        .await
        .map_err(|_| APIErrors::Unauthorized("Invalid token".to_string()))?;

    Ok(Json(VerifyResponse {
        valid: true,
        user: UserResponse::from(user),
    }))
}
