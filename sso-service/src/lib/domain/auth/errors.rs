use thiserror::Error;

use crate::domain::auth::models::AppId;
use crate::domain::auth::models::UserId;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("the email value is required")]
    Empty,
}

/// Error for Password validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("the password value is required")]
    Empty,
}

/// Error for identifier validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("the {field} is required and must be positive, got {actual}")]
    NotPositive { field: &'static str, actual: i64 },
}

/// Classified failure reported by a persistence adapter
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,

    #[error("record conflicts with an existing one: {0}")]
    Conflict(String),

    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("stored record is malformed: {0}")]
    Corrupted(String),
}

/// Error for token issuing operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    SigningFailed(String),
}

/// Error for password hashing operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HashingError {
    #[error("Failed to hash password: {0}")]
    HashFailed(String),

    #[error("Failed to verify password: {0}")]
    VerifyFailed(String),
}

/// Top-level error for all authentication operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    // Request validation errors (automatically converted via #[from])
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordError),

    #[error("Invalid identifier: {0}")]
    InvalidId(#[from] IdError),

    // Domain-level errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists: {0}")]
    UserAlreadyExists(String),

    #[error("Application not found: {0}")]
    ApplicationNotFound(AppId),

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    // Infrastructure errors
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Token issuance failed: {0}")]
    TokenIssuanceFailed(String),

    #[error("Storage error: {0}")]
    StorageFailure(String),
}

impl AuthError {
    /// Whether the error stems from a malformed request rather than from processing it.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidEmail(_) | AuthError::InvalidPassword(_) | AuthError::InvalidId(_)
        )
    }
}
