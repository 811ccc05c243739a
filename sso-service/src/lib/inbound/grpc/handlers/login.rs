use tonic::Status;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::Password;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;

pub async fn login<S: AuthServicePort>(
    service: &S,
    request: LoginRequest,
) -> Result<LoginResponse, Status> {
    let command = LoginCommand::try_from(request)?;

    let token = service.login(command).await?;

    Ok(LoginResponse { token })
}

impl TryFrom<LoginRequest> for LoginCommand {
    type Error = AuthError;

    fn try_from(request: LoginRequest) -> Result<Self, Self::Error> {
        Ok(LoginCommand::new(
            EmailAddress::new(request.email)?,
            Password::new(request.password)?,
            AppId::new(request.app_id)?,
        ))
    }
}
