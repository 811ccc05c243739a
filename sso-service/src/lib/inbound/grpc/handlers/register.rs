use tonic::Status;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::Password;
use crate::domain::auth::models::RegisterUserCommand;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::RegisterRequest;
use crate::proto::RegisterResponse;

pub async fn register<S: AuthServicePort>(
    service: &S,
    request: RegisterRequest,
) -> Result<RegisterResponse, Status> {
    let command = RegisterUserCommand::try_from(request)?;

    let user_id = service.register_new_user(command).await?;

    Ok(RegisterResponse { user_id: user_id.0 })
}

impl TryFrom<RegisterRequest> for RegisterUserCommand {
    type Error = AuthError;

    fn try_from(request: RegisterRequest) -> Result<Self, Self::Error> {
        Ok(RegisterUserCommand::new(
            EmailAddress::new(request.email)?,
            Password::new(request.password)?,
        ))
    }
}
