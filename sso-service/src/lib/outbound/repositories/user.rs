use async_trait::async_trait;
use sqlx::SqlitePool;

use super::classify;
use crate::domain::auth::errors::RepositoryError;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::UserRepository;

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    pass_hash: Vec<u8>,
    is_admin: bool,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = EmailAddress::new(row.email)
            .map_err(|e| RepositoryError::Corrupted(format!("user {}: {}", row.id, e)))?;

        Ok(User {
            id: UserId(row.id),
            email,
            pass_hash: row.pass_hash,
            is_admin: row.is_admin,
        })
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn save_user(
        &self,
        email: &EmailAddress,
        pass_hash: &[u8],
    ) -> Result<UserId, RepositoryError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (email, pass_hash)
            VALUES (?, ?)
            "#,
        )
        .bind(email.as_str())
        .bind(pass_hash)
        .execute(&self.pool)
        .await
        .map_err(classify)?;

        Ok(UserId(result.last_insert_rowid()))
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, pass_hash, is_admin
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)?;

        row.ok_or(RepositoryError::NotFound)?.try_into()
    }

    async fn is_admin(&self, user_id: UserId) -> Result<bool, RepositoryError> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT is_admin
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(user_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)?
        .ok_or(RepositoryError::NotFound)
    }
}
