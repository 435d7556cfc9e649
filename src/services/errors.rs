use crate::data::models::order::OrderStatus;
use crate::security::errors::AuthError;
use diesel::result;

#[derive(Debug, thiserror::Error)]
pub enum OrderServiceError {
    #[error("Validation failed")]
    Validation(Vec<String>),
    #[error("Order not found")]
    OrderNotFound,
    #[error("Business not found")]
    BusinessNotFound,
    #[error("Product {0} is not available from this business")]
    ProductUnavailable(i32),
    #[error("Price for product {0} does not match the current price")]
    PriceMismatch(i32),
    #[error("Total amount does not match the order items")]
    TotalMismatch,
    #[error("Invalid order status: {0}")]
    InvalidStatus(String),
    #[error("Insufficient stock for product {0}")]
    InsufficientStock(i32),
    #[error("Cannot change order status from {from} to {to}")]
    InvalidStatusTransition { from: OrderStatus, to: OrderStatus },
    #[error("Permission denied")]
    PermissionDenied,
    #[error("Database error: {0}")]
    DatabaseError(#[from] result::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum BusinessServiceError {
    #[error("No valid fields to update")]
    EmptyUpdate,
    #[error("Business not found")]
    BusinessNotFound,
    #[error("Only business owners can create businesses")]
    NotBusinessOwner,
    #[error("Not authorized to modify this business")]
    PermissionDenied,
    #[error("Database error: {0}")]
    DatabaseError(#[from] result::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ProductServiceError {
    #[error("No valid fields to update")]
    EmptyUpdate,
    #[error("Product not found")]
    ProductNotFound,
    #[error("Business not found")]
    BusinessNotFound,
    #[error("Not authorized to modify this product")]
    PermissionDenied,
    #[error("Database error: {0}")]
    DatabaseError(#[from] result::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    #[error("Validation failed")]
    Validation(Vec<String>),
    #[error("No valid fields to update")]
    EmptyUpdate,
    #[error("User already exists with this username, email, or index number")]
    AlreadyExists,
    #[error("User is already a business owner")]
    AlreadyBusinessOwner,
    #[error("User not found")]
    UserNotFound,
    #[error("Current password is incorrect")]
    WrongPassword,
    #[error("You can only modify your own account")]
    PermissionDenied,
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("Database error: {0}")]
    DatabaseError(#[from] result::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ReviewServiceError {
    #[error("Review not found")]
    ReviewNotFound,
    #[error("Business not found")]
    BusinessNotFound,
    #[error("You can only delete your own reviews")]
    PermissionDenied,
    #[error("Database error: {0}")]
    DatabaseError(#[from] result::Error),
}

impl From<AuthError> for BusinessServiceError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::ResourceNotFound(_) => BusinessServiceError::BusinessNotFound,
            AuthError::Database(e) => BusinessServiceError::DatabaseError(e),
            _ => BusinessServiceError::PermissionDenied,
        }
    }
}

impl From<AuthError> for ProductServiceError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::ResourceNotFound("Business") => ProductServiceError::BusinessNotFound,
            AuthError::ResourceNotFound(_) => ProductServiceError::ProductNotFound,
            AuthError::Database(e) => ProductServiceError::DatabaseError(e),
            _ => ProductServiceError::PermissionDenied,
        }
    }
}
