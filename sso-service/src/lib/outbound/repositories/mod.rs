pub mod app;
pub mod user;

use std::str::FromStr;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

pub use app::SqliteAppRepository;
pub use user::SqliteUserRepository;

use crate::config::DatabaseConfig;
use crate::domain::auth::errors::RepositoryError;

/// Schema migrations embedded at compile time.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Open a connection pool, creating the database file if it does not exist.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

/// Classify a driver error; unique constraint violations become conflicts.
fn classify(error: sqlx::Error) -> RepositoryError {
    if let Some(db_err) = error.as_database_error() {
        if db_err.is_unique_violation() {
            return RepositoryError::Conflict(db_err.message().to_string());
        }
    }

    match error {
        sqlx::Error::RowNotFound => RepositoryError::NotFound,
        other => RepositoryError::Unavailable(other.to_string()),
    }
}
