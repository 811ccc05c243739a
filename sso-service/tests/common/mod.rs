#![allow(dead_code)]

use std::sync::Arc;

use chrono::Duration;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use sso_service::domain::auth::service::AuthService;
use sso_service::inbound::grpc::AuthGrpcService;
use sso_service::outbound::repositories::SqliteAppRepository;
use sso_service::outbound::repositories::SqliteUserRepository;
use sso_service::outbound::repositories::MIGRATOR;
use sso_service::outbound::token::JwtTokenIssuer;

pub const APP_ID: i32 = 1;
pub const APP_SECRET: &[u8] = b"test-secret";
pub const TOKEN_TTL_SECONDS: i64 = 3600;

pub type TestAuthService = AuthService<SqliteUserRepository, SqliteAppRepository, JwtTokenIssuer>;

/// Full service stack over an in-memory database
pub struct TestApp {
    pub grpc: AuthGrpcService<TestAuthService>,
    pub service: Arc<TestAuthService>,
    pub db: TestDb,
    pub token_ttl: Duration,
}

/// Test database helper
pub struct TestDb {
    pub pool: SqlitePool,
}

impl TestApp {
    /// Build the application with one registered application (`APP_ID`, `APP_SECRET`)
    pub async fn spawn() -> Self {
        let db = TestDb::new().await;
        db.insert_app(APP_ID, "test", APP_SECRET).await;

        let token_ttl = Duration::seconds(TOKEN_TTL_SECONDS);

        let service = Arc::new(
            AuthService::new(
                Arc::new(SqliteUserRepository::new(db.pool.clone())),
                Arc::new(SqliteAppRepository::new(db.pool.clone())),
                Arc::new(JwtTokenIssuer::new()),
                token_ttl,
            )
            // Keep hashing cheap so the suite stays fast
            .with_password_hasher(
                auth::PasswordHasher::with_cost(8 * 1024, 1, 1).expect("Invalid hasher cost"),
            ),
        );

        Self {
            grpc: AuthGrpcService::new(Arc::clone(&service)),
            service,
            db,
            token_ttl,
        }
    }
}

impl TestDb {
    /// Create a fresh in-memory database with migrations applied
    pub async fn new() -> Self {
        // A single connection that never expires: each SQLite in-memory
        // connection owns a separate database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");

        MIGRATOR
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Self { pool }
    }

    pub async fn insert_app(&self, id: i32, name: &str, secret: &[u8]) {
        sqlx::query("INSERT INTO apps (id, name, secret) VALUES (?, ?, ?)")
            .bind(id)
            .bind(name)
            .bind(secret)
            .execute(&self.pool)
            .await
            .expect("Failed to insert app");
    }

    pub async fn promote_to_admin(&self, user_id: i64) {
        sqlx::query("UPDATE users SET is_admin = TRUE WHERE id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .expect("Failed to promote user");
    }

    pub async fn count_users_with_email(&self, email: &str) -> i64 {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count users")
    }
}

/// Unique email for a test user
pub fn fake_email() -> String {
    format!("user-{}@example.com", uuid::Uuid::new_v4())
}
