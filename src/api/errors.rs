use crate::security::errors::AuthError;
use crate::services::errors::{
    BusinessServiceError, OrderServiceError, ProductServiceError, ReviewServiceError,
    UserServiceError,
};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_with::skip_serializing_none;

#[derive(Debug, thiserror::Error)]
pub enum APIErrors {
    #[error("{message}")]
    Validation {
        message: String,
        details: Vec<String>,
    },
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Internal(String),
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    details: Option<Vec<String>>,
}

impl APIErrors {
    pub fn validation(details: Vec<String>) -> Self {
        APIErrors::Validation {
            message: "Validation failed".to_string(),
            details,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            APIErrors::Validation { .. } | APIErrors::BadRequest(_) => StatusCode::BAD_REQUEST,
            APIErrors::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            APIErrors::Forbidden(_) => StatusCode::FORBIDDEN,
            APIErrors::NotFound(_) => StatusCode::NOT_FOUND,
            APIErrors::Conflict(_) => StatusCode::CONFLICT,
            APIErrors::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for APIErrors {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            APIErrors::Validation { message, details } => ErrorBody {
                error: message,
                details: Some(details),
            },
            other => ErrorBody {
                error: other.to_string(),
                details: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

fn internal(context: &str, e: impl std::fmt::Display) -> APIErrors {
    tracing::error!("{}: {}", context, e);
    APIErrors::Internal(context.to_string())
}

impl From<AuthError> for APIErrors {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingToken
            | AuthError::TokenExpired
            | AuthError::InvalidToken
            | AuthError::InvalidCredentials => APIErrors::Unauthorized(e.to_string()),
            AuthError::NotOwner => APIErrors::Forbidden(e.to_string()),
            AuthError::ResourceNotFound(_) => APIErrors::NotFound(e.to_string()),
            AuthError::HashingError
            | AuthError::VerificationError
            | AuthError::TokenCreationError
            | AuthError::Database(_) => internal("Authentication error", e),
        }
    }
}

impl From<OrderServiceError> for APIErrors {
    fn from(e: OrderServiceError) -> Self {
        match e {
            OrderServiceError::Validation(details) => APIErrors::validation(details),
            OrderServiceError::ProductUnavailable(_)
            | OrderServiceError::PriceMismatch(_)
            | OrderServiceError::TotalMismatch
            | OrderServiceError::InvalidStatus(_) => APIErrors::BadRequest(e.to_string()),
            OrderServiceError::OrderNotFound | OrderServiceError::BusinessNotFound => {
                APIErrors::NotFound(e.to_string())
            }
            OrderServiceError::InsufficientStock(_)
            | OrderServiceError::InvalidStatusTransition { .. } => {
                APIErrors::Conflict(e.to_string())
            }
            OrderServiceError::PermissionDenied => {
                APIErrors::Forbidden("Not authorized to access this order".to_string())
            }
            OrderServiceError::DatabaseError(e) => internal("Error processing order", e),
        }
    }
}

impl From<BusinessServiceError> for APIErrors {
    fn from(e: BusinessServiceError) -> Self {
        match e {
            BusinessServiceError::EmptyUpdate => APIErrors::BadRequest(e.to_string()),
            BusinessServiceError::BusinessNotFound => APIErrors::NotFound(e.to_string()),
            BusinessServiceError::NotBusinessOwner | BusinessServiceError::PermissionDenied => {
                APIErrors::Forbidden(e.to_string())
            }
            BusinessServiceError::DatabaseError(e) => internal("Error processing business", e),
        }
    }
}

impl From<ProductServiceError> for APIErrors {
    fn from(e: ProductServiceError) -> Self {
        match e {
            ProductServiceError::EmptyUpdate => APIErrors::BadRequest(e.to_string()),
            ProductServiceError::ProductNotFound | ProductServiceError::BusinessNotFound => {
                APIErrors::NotFound(e.to_string())
            }
            ProductServiceError::PermissionDenied => APIErrors::Forbidden(e.to_string()),
            ProductServiceError::DatabaseError(e) => internal("Error processing product", e),
        }
    }
}

impl From<UserServiceError> for APIErrors {
    fn from(e: UserServiceError) -> Self {
        match e {
            UserServiceError::Validation(details) => APIErrors::validation(details),
            UserServiceError::EmptyUpdate | UserServiceError::WrongPassword => {
                APIErrors::BadRequest(e.to_string())
            }
            UserServiceError::AlreadyExists | UserServiceError::AlreadyBusinessOwner => {
                APIErrors::Conflict(e.to_string())
            }
            UserServiceError::UserNotFound => APIErrors::NotFound(e.to_string()),
            UserServiceError::PermissionDenied => APIErrors::Forbidden(e.to_string()),
            UserServiceError::Auth(e) => APIErrors::from(e),
            UserServiceError::DatabaseError(e) => internal("Error processing user", e),
        }
    }
}

impl From<ReviewServiceError> for APIErrors {
    fn from(e: ReviewServiceError) -> Self {
        match e {
            ReviewServiceError::ReviewNotFound | ReviewServiceError::BusinessNotFound => {
                APIErrors::NotFound(e.to_string())
            }
            ReviewServiceError::PermissionDenied => APIErrors::Forbidden(e.to_string()),
            ReviewServiceError::DatabaseError(e) => internal("Error processing review", e),
        }
    }
}
