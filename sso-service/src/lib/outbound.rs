pub mod password;
pub mod repositories;
pub mod token;
