use auth::PasswordHasher;

use crate::domain::auth::errors::HashingError;
use crate::domain::auth::ports::PasswordHashing;

impl PasswordHashing for PasswordHasher {
    fn hash(&self, password: &str) -> Result<Vec<u8>, HashingError> {
        PasswordHasher::hash(self, password).map_err(|e| HashingError::HashFailed(e.to_string()))
    }

    fn verify(&self, password: &str, pass_hash: &[u8]) -> Result<bool, HashingError> {
        PasswordHasher::verify(self, password, pass_hash)
            .map_err(|e| HashingError::VerifyFailed(e.to_string()))
    }
}
