use async_trait::async_trait;

use request_core_api::error::{WorkflowError, WorkflowResult};
use request_core_db::models::request::CustomerRequestModel;
use request_core_db::repository::List;

use super::repo_impl::SqliteRequestRepository;
use crate::utils::TryFromRow;

#[async_trait]
impl List<CustomerRequestModel> for SqliteRequestRepository {
    async fn list(&self) -> WorkflowResult<Vec<CustomerRequestModel>> {
        let rows = sqlx::query(
            r#"
            SELECT id, data, status, created_at, updated_at, version
            FROM requests
            ORDER BY updated_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| WorkflowError::StorageError(e.to_string()))?;

        rows.iter()
            .map(|row| {
                CustomerRequestModel::try_from_row(row)
                    .map_err(|e| WorkflowError::StorageError(e.to_string()))
            })
            .collect()
    }
}
