//! Test helpers for an in-memory SQLite database.
//!
//! Each helper opens the database named by `DATABASE_URL` (a fresh
//! `sqlite::memory:` database by default) and applies the migrations, so
//! every test starts from an empty schema with no cleanup. The pool is
//! capped at one connection; an in-memory database exists per connection,
//! and a single shared connection keeps it alive and visible to every task
//! in the test.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::time::Duration;

use crate::SqliteRequestRepository;

pub async fn setup_test_pool() -> Result<SqlitePool, Box<dyn std::error::Error + Send + Sync>> {
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string());

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&database_url)
        .await?;

    sqlx::migrate!().run(&pool).await?;

    Ok(pool)
}

pub async fn setup_test_repository(
) -> Result<SqliteRequestRepository, Box<dyn std::error::Error + Send + Sync>> {
    Ok(SqliteRequestRepository::new(setup_test_pool().await?))
}
