use async_trait::async_trait;
use chrono::Duration;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::HashingError;
use crate::domain::auth::errors::RepositoryError;
use crate::domain::auth::errors::TokenError;
use crate::domain::auth::models::App;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::RegisterUserCommand;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;

/// Port for authentication domain service operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials and issue a token scoped to an application.
    ///
    /// # Arguments
    /// * `command` - Validated email, password and application ID
    ///
    /// # Returns
    /// Signed token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (deliberately indistinguishable)
    /// * `ApplicationNotFound` - No application with this ID
    /// * `TokenIssuanceFailed` - Token signing failed
    /// * `StorageFailure` - Application lookup failed
    async fn login(&self, command: LoginCommand) -> Result<String, AuthError>;

    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Validated email and plaintext password
    ///
    /// # Returns
    /// ID assigned to the new user
    ///
    /// # Errors
    /// * `UserAlreadyExists` - Email is already registered
    /// * `HashingFailed` - Password hash could not be derived
    /// * `StorageFailure` - Persistence failed
    async fn register_new_user(&self, command: RegisterUserCommand) -> Result<UserId, AuthError>;

    /// Check whether a user is an administrator.
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this ID
    /// * `StorageFailure` - Lookup failed
    async fn is_admin(&self, user_id: UserId) -> Result<bool, AuthError>;
}

/// Persistence operations for users.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user and return its assigned ID.
    ///
    /// # Errors
    /// * `Conflict` - Email is already registered
    /// * `Unavailable` - Database operation failed
    async fn save_user(
        &self,
        email: &EmailAddress,
        pass_hash: &[u8],
    ) -> Result<UserId, RepositoryError>;

    /// Retrieve a user by exact email.
    ///
    /// # Errors
    /// * `NotFound` - No user with this email
    /// * `Unavailable` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<User, RepositoryError>;

    /// Read the admin flag of a user.
    ///
    /// # Errors
    /// * `NotFound` - No user with this ID
    /// * `Unavailable` - Database operation failed
    async fn is_admin(&self, user_id: UserId) -> Result<bool, RepositoryError>;
}

/// Persistence operations for applications.
#[async_trait]
pub trait AppRepository: Send + Sync + 'static {
    /// Retrieve an application by ID.
    ///
    /// # Errors
    /// * `NotFound` - No application with this ID
    /// * `Unavailable` - Database operation failed
    async fn find_by_id(&self, app_id: AppId) -> Result<App, RepositoryError>;
}

/// Issues signed tokens binding a user to an application.
pub trait TokenIssuer: Send + Sync + 'static {
    /// Sign a token for `user` scoped to `app`, expiring `ttl` from now.
    ///
    /// The application's secret is the signing key.
    ///
    /// # Errors
    /// * `SigningFailed` - Token could not be signed
    fn issue(&self, user: &User, app: &App, ttl: Duration) -> Result<String, TokenError>;
}

/// Derives and checks salted password hashes.
///
/// Both operations are CPU-bound; callers run them off the async executor.
pub trait PasswordHashing: Send + Sync + 'static {
    /// Derive a hash of `password` with a fresh salt.
    ///
    /// # Errors
    /// * `HashFailed` - Hash could not be derived
    fn hash(&self, password: &str) -> Result<Vec<u8>, HashingError>;

    /// Check `password` against a hash produced by `hash`.
    ///
    /// # Errors
    /// * `VerifyFailed` - Stored hash is unreadable
    fn verify(&self, password: &str, pass_hash: &[u8]) -> Result<bool, HashingError>;
}
