use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use tracing::Instrument;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::RepositoryError;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::RegisterUserCommand;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::AppRepository;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::PasswordHashing;
use crate::domain::auth::ports::TokenIssuer;
use crate::domain::auth::ports::UserRepository;

/// Domain service implementation for authentication operations.
///
/// Holds no mutable state; all shared state lives behind the repositories, so
/// one instance serves any number of concurrent requests.
pub struct AuthService<UR, AR, TI, PH = auth::PasswordHasher>
where
    UR: UserRepository,
    AR: AppRepository,
    TI: TokenIssuer,
    PH: PasswordHashing,
{
    user_repository: Arc<UR>,
    app_repository: Arc<AR>,
    token_issuer: Arc<TI>,
    password_hasher: Arc<PH>,
    token_ttl: Duration,
}

impl<UR, AR, TI> AuthService<UR, AR, TI>
where
    UR: UserRepository,
    AR: AppRepository,
    TI: TokenIssuer,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `user_repository` - User persistence implementation
    /// * `app_repository` - Application persistence implementation
    /// * `token_issuer` - Token signing implementation
    /// * `token_ttl` - Lifetime of issued tokens
    pub fn new(
        user_repository: Arc<UR>,
        app_repository: Arc<AR>,
        token_issuer: Arc<TI>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            user_repository,
            app_repository,
            token_issuer,
            password_hasher: Arc::new(auth::PasswordHasher::new()),
            token_ttl,
        }
    }
}

impl<UR, AR, TI, PH> AuthService<UR, AR, TI, PH>
where
    UR: UserRepository,
    AR: AppRepository,
    TI: TokenIssuer,
    PH: PasswordHashing,
{
    /// Replace the default password hasher, e.g. to tune its cost.
    pub fn with_password_hasher<P: PasswordHashing>(
        self,
        password_hasher: P,
    ) -> AuthService<UR, AR, TI, P> {
        AuthService {
            user_repository: self.user_repository,
            app_repository: self.app_repository,
            token_issuer: self.token_issuer,
            password_hasher: Arc::new(password_hasher),
            token_ttl: self.token_ttl,
        }
    }
}

#[async_trait]
impl<UR, AR, TI, PH> AuthServicePort for AuthService<UR, AR, TI, PH>
where
    UR: UserRepository,
    AR: AppRepository,
    TI: TokenIssuer,
    PH: PasswordHashing,
{
    async fn login(&self, command: LoginCommand) -> Result<String, AuthError> {
        let span = tracing::info_span!(
            "login",
            op = "AuthService::login",
            email = %command.email,
            app_id = %command.app_id
        );

        async move {
            tracing::info!("attempting to log in user");

            let user = match self.user_repository.find_by_email(&command.email).await {
                Ok(user) => user,
                Err(RepositoryError::NotFound) => {
                    tracing::warn!("user not found");
                    return Err(AuthError::InvalidCredentials);
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to get user");
                    return Err(AuthError::InvalidCredentials);
                }
            };

            let hasher = Arc::clone(&self.password_hasher);
            let password = command.password;
            let pass_hash = user.pass_hash.clone();
            let verified = tokio::task::spawn_blocking(move || {
                hasher.verify(password.expose(), &pass_hash)
            })
            .await;

            match verified {
                Ok(Ok(true)) => {}
                Ok(Ok(false)) => {
                    tracing::info!(user_id = %user.id, "invalid credentials");
                    return Err(AuthError::InvalidCredentials);
                }
                Ok(Err(e)) => {
                    tracing::error!(user_id = %user.id, error = %e, "stored password hash is unreadable");
                    return Err(AuthError::InvalidCredentials);
                }
                Err(e) => {
                    tracing::error!(user_id = %user.id, error = %e, "password verification task failed");
                    return Err(AuthError::InvalidCredentials);
                }
            }

            let app = self
                .app_repository
                .find_by_id(command.app_id)
                .await
                .map_err(|e| match e {
                    RepositoryError::NotFound => {
                        tracing::warn!("application not found");
                        AuthError::ApplicationNotFound(command.app_id)
                    }
                    other => {
                        tracing::error!(error = %other, "failed to get application");
                        AuthError::StorageFailure(other.to_string())
                    }
                })?;

            let token = self
                .token_issuer
                .issue(&user, &app, self.token_ttl)
                .map_err(|e| {
                    tracing::error!(error = %e, "failed to generate token");
                    AuthError::TokenIssuanceFailed(e.to_string())
                })?;

            tracing::info!(user_id = %user.id, "user logged in successfully");

            Ok(token)
        }
        .instrument(span)
        .await
    }

    async fn register_new_user(&self, command: RegisterUserCommand) -> Result<UserId, AuthError> {
        let span = tracing::info_span!(
            "register_new_user",
            op = "AuthService::register_new_user",
            email = %command.email
        );

        async move {
            tracing::info!("registering user");

            let hasher = Arc::clone(&self.password_hasher);
            let password = command.password;
            let pass_hash = tokio::task::spawn_blocking(move || hasher.hash(password.expose()))
                .await
                .map_err(|e| AuthError::HashingFailed(e.to_string()))
                .and_then(|hashed| hashed.map_err(|e| AuthError::HashingFailed(e.to_string())))
                .map_err(|e| {
                    tracing::error!(error = %e, "failed to generate password hash");
                    e
                })?;

            let user_id = self
                .user_repository
                .save_user(&command.email, &pass_hash)
                .await
                .map_err(|e| match e {
                    RepositoryError::Conflict(_) => {
                        tracing::warn!("user already exists");
                        AuthError::UserAlreadyExists(command.email.to_string())
                    }
                    other => {
                        tracing::error!(error = %other, "failed to save user");
                        AuthError::StorageFailure(other.to_string())
                    }
                })?;

            tracing::info!(user_id = %user_id, "user registered");

            Ok(user_id)
        }
        .instrument(span)
        .await
    }

    async fn is_admin(&self, user_id: UserId) -> Result<bool, AuthError> {
        let span = tracing::info_span!(
            "is_admin",
            op = "AuthService::is_admin",
            user_id = %user_id
        );

        async move {
            tracing::info!("checking if user is admin");

            let is_admin = self
                .user_repository
                .is_admin(user_id)
                .await
                .map_err(|e| match e {
                    RepositoryError::NotFound => {
                        tracing::warn!("user not found");
                        AuthError::UserNotFound(user_id)
                    }
                    other => {
                        tracing::error!(error = %other, "failed to get admin info");
                        AuthError::StorageFailure(other.to_string())
                    }
                })?;

            tracing::info!(is_admin, "checked if user is admin");

            Ok(is_admin)
        }
        .instrument(span)
        .await
    }
}
