use async_trait::async_trait;

use request_core_api::error::{WorkflowError, WorkflowResult};
use request_core_db::models::request::CustomerRequestModel;
use request_core_db::repository::Load;

use super::repo_impl::SqliteRequestRepository;
use crate::utils::TryFromRow;

#[async_trait]
impl Load<CustomerRequestModel> for SqliteRequestRepository {
    async fn load(&self, id: &str) -> WorkflowResult<Option<CustomerRequestModel>> {
        let row = sqlx::query(
            r#"
            SELECT id, data, status, created_at, updated_at, version
            FROM requests
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| WorkflowError::StorageError(e.to_string()))?;

        row.map(|row| CustomerRequestModel::try_from_row(&row))
            .transpose()
            .map_err(|e| WorkflowError::StorageError(e.to_string()))
    }
}
