use tonic::Status;

use crate::domain::auth::errors::AuthError;

pub mod is_admin;
pub mod login;
pub mod register;

/// Single translation point from domain errors to gRPC status codes.
///
/// Validation failures carry their message back to the caller; every other
/// failure is logged here and surfaced as an opaque internal error.
impl From<AuthError> for Status {
    fn from(err: AuthError) -> Self {
        if err.is_invalid_argument() {
            return Status::invalid_argument(err.to_string());
        }

        tracing::error!(error = %err, "request failed");
        Status::internal("internal error")
    }
}

#[cfg(test)]
mod tests {
    use tonic::Code;

    use super::*;
    use crate::domain::auth::errors::EmailError;
    use crate::domain::auth::models::AppId;

    #[test]
    fn test_validation_errors_keep_their_message() {
        let status = Status::from(AuthError::from(EmailError::Empty));

        assert_eq!(status.code(), Code::InvalidArgument);
        assert!(status.message().contains("the email value is required"));
    }

    #[test]
    fn test_domain_errors_are_opaque() {
        for err in [
            AuthError::InvalidCredentials,
            AuthError::ApplicationNotFound(AppId(9)),
            AuthError::UserAlreadyExists("alice@example.com".to_string()),
            AuthError::StorageFailure("database is locked".to_string()),
        ] {
            let status = Status::from(err);

            assert_eq!(status.code(), Code::Internal);
            assert_eq!(status.message(), "internal error");
        }
    }
}
