use async_trait::async_trait;

use request_core_api::error::{WorkflowError, WorkflowResult};
use request_core_db::models::request::{to_document, CustomerRequestModel};
use request_core_db::repository::Create;

use super::repo_impl::SqliteRequestRepository;

#[async_trait]
impl Create<CustomerRequestModel> for SqliteRequestRepository {
    async fn create(&self, entity: &CustomerRequestModel) -> WorkflowResult<()> {
        let data =
            to_document(entity).map_err(|e| WorkflowError::StorageError(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO requests (id, data, status, created_at, updated_at, version)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(entity.id.as_str())
        .bind(&data)
        .bind(entity.status.as_str())
        .bind(entity.created_at)
        .bind(entity.updated_at)
        .bind(entity.version)
        .execute(&self.pool)
        .await
        .map_err(|e| WorkflowError::StorageError(e.to_string()))?;

        Ok(())
    }
}
