use async_trait::async_trait;

use request_core_api::error::{WorkflowError, WorkflowResult};
use request_core_db::repository::NextSequence;

use super::repo_impl::SqliteRequestRepository;

#[async_trait]
impl NextSequence for SqliteRequestRepository {
    async fn next_sequence(&self, counter: &str) -> WorkflowResult<i64> {
        sqlx::query(
            r#"
            INSERT INTO counters (name, value)
            VALUES (?, 0)
            ON CONFLICT(name) DO NOTHING
            "#,
        )
        .bind(counter)
        .execute(&self.pool)
        .await
        .map_err(|e| WorkflowError::StorageError(e.to_string()))?;

        // The single UPDATE both increments and reads, so two callers can
        // never observe the same value.
        sqlx::query_scalar(
            r#"
            UPDATE counters
            SET value = value + 1
            WHERE name = ?
            RETURNING value
            "#,
        )
        .bind(counter)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| WorkflowError::StorageError(e.to_string()))
    }
}
