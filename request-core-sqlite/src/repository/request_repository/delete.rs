use async_trait::async_trait;

use request_core_api::error::{WorkflowError, WorkflowResult};
use request_core_db::models::request::CustomerRequestModel;
use request_core_db::repository::Delete;

use super::repo_impl::SqliteRequestRepository;

#[async_trait]
impl Delete<CustomerRequestModel> for SqliteRequestRepository {
    async fn delete(&self, id: &str) -> WorkflowResult<bool> {
        let result = sqlx::query("DELETE FROM requests WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| WorkflowError::StorageError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
