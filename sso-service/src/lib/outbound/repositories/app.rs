use async_trait::async_trait;
use sqlx::SqlitePool;

use super::classify;
use crate::domain::auth::errors::RepositoryError;
use crate::domain::auth::models::App;
use crate::domain::auth::models::AppId;
use crate::domain::auth::ports::AppRepository;

/// Read-only access to registered applications.
///
/// Applications are provisioned out of band; this service never writes them.
pub struct SqliteAppRepository {
    pool: SqlitePool,
}

impl SqliteAppRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AppRow {
    id: i32,
    name: String,
    secret: Vec<u8>,
}

impl From<AppRow> for App {
    fn from(row: AppRow) -> Self {
        Self {
            id: AppId(row.id),
            name: row.name,
            secret: row.secret,
        }
    }
}

#[async_trait]
impl AppRepository for SqliteAppRepository {
    async fn find_by_id(&self, app_id: AppId) -> Result<App, RepositoryError> {
        sqlx::query_as::<_, AppRow>(
            r#"
            SELECT id, name, secret
            FROM apps
            WHERE id = ?
            "#,
        )
        .bind(app_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)?
        .map(App::from)
        .ok_or(RepositoryError::NotFound)
    }
}
