use crate::api::config::Config;
use crate::data::models::user::User;
use crate::security::errors::AuthError;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Issues and verifies HS256 access tokens.
#[derive(Clone)]
pub struct JwtService {
    secret: String,
    expiration_minutes: u64,
}

impl JwtService {
    pub fn new(config: &Config) -> Self {
        JwtService {
            secret: config.jwt_secret.clone(),
            expiration_minutes: config.jwt_expiration_minutes,
        }
    }

    pub fn generate_token(&self, user: &User) -> Result<String, AuthError> {
        let curr_time = chrono::Utc::now().timestamp() as usize;

        let claims = AccessClaims {
            sub: user.id,
            username: user.username.clone(),
            account_type: user.account_type.clone(),
            iat: curr_time,
            exp: curr_time.saturating_add(self.expiration_minutes.saturating_mul(60) as usize),
        };

        self.encode_claims(&claims)
    }

    pub fn encode_claims(&self, claims: &AccessClaims) -> Result<String, AuthError> {
        jsonwebtoken::encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
        .map_err(|_| AuthError::TokenCreationError)
    }

    pub fn decode_token(&self, token: &str) -> Result<AccessClaims, AuthError> {
        jsonwebtoken::decode::<AccessClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessClaims {
    /// Subject (user ID)
    pub sub: i32,
    pub username: String,
    pub account_type: String,
    /// Issued at (as UTC timestamp)
    pub iat: usize,
    /// Expiration time (as UTC timestamp)
    pub exp: usize,
}

impl AccessClaims {
    pub fn user_id(&self) -> i32 {
        self.sub
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &str) -> JwtService {
        JwtService {
            secret: secret.to_string(),
            expiration_minutes: 60,
        }
    }

    fn claims(exp_offset: i64) -> AccessClaims {
        let now = chrono::Utc::now().timestamp();
        AccessClaims {
            sub: 7,
            username: "ama".to_string(),
            account_type: "user".to_string(),
            iat: now as usize,
            exp: (now + exp_offset) as usize,
        }
    }

    #[test]
    fn round_trips_claims() {
        let jwt = service("secret");
        let token = jwt.encode_claims(&claims(3600)).unwrap();
        let decoded = jwt.decode_token(&token).unwrap();
        assert_eq!(decoded.user_id(), 7);
        assert_eq!(decoded.username, "ama");
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let jwt = service("secret");
        let token = jwt.encode_claims(&claims(-3600)).unwrap();
        assert_eq!(jwt.decode_token(&token), Err(AuthError::TokenExpired));
    }

    #[test]
    fn foreign_signature_is_invalid() {
        let token = service("other").encode_claims(&claims(3600)).unwrap();
        assert_eq!(service("secret").decode_token(&token), Err(AuthError::InvalidToken));
        assert_eq!(service("secret").decode_token("garbage"), Err(AuthError::InvalidToken));
    }
}
