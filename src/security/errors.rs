#[derive(Debug, thiserror::Error, PartialEq)]
pub enum AuthError {
    #[error("Password hashing failed")]
    HashingError,
    #[error("Password verification failed")]
    VerificationError,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Access token required")]
    MissingToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token creation failed")]
    TokenCreationError,
    #[error("Not authorized to modify this resource")]
    NotOwner,
    #[error("{0} not found")]
    ResourceNotFound(&'static str),
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),
}
