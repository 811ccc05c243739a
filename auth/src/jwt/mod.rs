//! HS256 token signing keyed by a per-application secret.

mod claims;
mod errors;
mod handler;

pub use claims::Claims;
pub use errors::JwtError;
pub use handler::JwtHandler;
