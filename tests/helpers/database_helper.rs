//! Database test helpers
//!
//! PostgreSQL tests run only when `TEST_DATABASE_URL` points at a disposable
//! database. Without it they return early.

use calendar_mail::config::DatabaseConfig;
use calendar_mail::database::{
    create_pool, health_check, run_migrations, DatabasePool, DatabaseService,
};

/// Migrated test database
pub struct TestDatabase {
    pub pool: DatabasePool,
    pub database_url: String,
}

impl TestDatabase {
    /// Connect and migrate, or `None` when no test database is configured
    pub async fn connect() -> Option<Self> {
        let database_url = std::env::var("TEST_DATABASE_URL").ok()?;

        let config = DatabaseConfig {
            url: database_url.clone(),
            max_connections: 5,
            min_connections: 1,
        };
        let pool = create_pool(&config)
            .await
            .expect("Failed to connect to test database");
        health_check(&pool)
            .await
            .expect("Test database is not healthy");
        run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let database = Self { pool, database_url };
        database.cleanup().await;
        Some(database)
    }

    pub fn service(&self) -> DatabaseService {
        DatabaseService::new(self.pool.clone())
    }

    /// Remove every row, resetting ids
    pub async fn cleanup(&self) {
        sqlx::query("TRUNCATE user_events, events, users RESTART IDENTITY CASCADE")
            .execute(&self.pool)
            .await
            .expect("Failed to clean test database");
    }

    pub async fn count_records(&self, table: &str) -> i64 {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count records");
        count.0
    }
}
