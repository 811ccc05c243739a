use auth::Claims;
use auth::JwtHandler;
use chrono::Duration;

use crate::domain::auth::errors::TokenError;
use crate::domain::auth::models::App;
use crate::domain::auth::models::User;
use crate::domain::auth::ports::TokenIssuer;

/// Issues HS256 JWTs signed with the target application's secret.
#[derive(Debug, Default, Clone, Copy)]
pub struct JwtTokenIssuer;

impl JwtTokenIssuer {
    pub fn new() -> Self {
        Self
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, user: &User, app: &App, ttl: Duration) -> Result<String, TokenError> {
        let claims = Claims::for_user(user.id.0, user.email.as_str(), app.id.0, ttl)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))?;

        JwtHandler::new(&app.secret)
            .encode(&claims)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }
}
