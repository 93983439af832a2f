use async_trait::async_trait;

use request_core_api::error::{WorkflowError, WorkflowResult};
use request_core_db::models::request::{to_document, CustomerRequestModel};
use request_core_db::repository::Update;

use super::repo_impl::SqliteRequestRepository;

#[async_trait]
impl Update<CustomerRequestModel> for SqliteRequestRepository {
    async fn update(
        &self,
        entity: &CustomerRequestModel,
        expected_version: i64,
    ) -> WorkflowResult<()> {
        let data =
            to_document(entity).map_err(|e| WorkflowError::StorageError(e.to_string()))?;

        let result = sqlx::query(
            r#"
            UPDATE requests
            SET data = ?, status = ?, updated_at = ?, version = ?
            WHERE id = ? AND version = ?
            "#,
        )
        .bind(&data)
        .bind(entity.status.as_str())
        .bind(entity.updated_at)
        .bind(entity.version)
        .bind(entity.id.as_str())
        .bind(expected_version)
        .execute(&self.pool)
        .await
        .map_err(|e| WorkflowError::StorageError(e.to_string()))?;

        if result.rows_affected() == 0 {
            // Distinguish a vanished row from a version mismatch.
            let exists: Option<i64> = sqlx::query_scalar("SELECT 1 FROM requests WHERE id = ?")
                .bind(entity.id.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| WorkflowError::StorageError(e.to_string()))?;

            return Err(if exists.is_some() {
                WorkflowError::Conflict(format!("Request {} changed concurrently", entity.id))
            } else {
                WorkflowError::NotFound(format!("Request {}", entity.id))
            });
        }

        Ok(())
    }
}
