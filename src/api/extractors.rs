use crate::api::errors::APIErrors;
use crate::api::state::AppState;
use crate::security::errors::AuthError;
use crate::security::jwt::AccessClaims;
use axum::RequestPartsExt;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::extract::CookieJar;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

pub const TOKEN_COOKIE: &str = "token";

/// Caller identity for routes that require a signed-in user.
impl FromRequestParts<AppState> for AccessClaims {
    type Rejection = APIErrors;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = token_from_request_part(parts).await.ok_or_else(|| {
            tracing::warn!("Request without access token");
            AuthError::MissingToken
        })?;

        let claims = state.jwt.decode_token(&token).map_err(|e| {
            tracing::warn!("Token rejected: {}", e);
            e
        })?;

        Ok(claims)
    }
}

/// Identity for public routes that personalise their output when the caller
/// is signed in. A missing or bad token simply yields `None`.
#[derive(Debug, Clone)]
pub struct MaybeClaims(pub Option<AccessClaims>);

impl FromRequestParts<AppState> for MaybeClaims {
    type Rejection = APIErrors;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let claims = match token_from_request_part(parts).await {
            Some(token) => state.jwt.decode_token(&token).ok(),
            None => None,
        };

        Ok(MaybeClaims(claims))
    }
}

/// Bearer header first, then the `token` cookie.
async fn token_from_request_part(parts: &mut Parts) -> Option<String> {
    if let Ok(TypedHeader(Authorization(bearer))) =
        parts.extract::<TypedHeader<Authorization<Bearer>>>().await
    {
        return Some(bearer.token().to_string());
    }

    CookieJar::from_headers(&parts.headers)
        .get(TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}
