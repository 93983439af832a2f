use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use std::error::Error;
use std::str::FromStr;

use request_core_api::domain::RequestStatus;
use request_core_api::error::{WorkflowError, WorkflowResult};
use request_core_db::models::request::{parse_document, CustomerRequestModel};

use crate::utils::{get_heapless_string, TryFromRow};

/// SQLite-backed [`request_core_db::repository::RequestStore`].
///
/// Each request is stored as one row: the JSON document in `data` is the
/// source of truth, with id, status, timestamps and the version counter
/// denormalized into columns. Updates are guarded by `WHERE version = ?`,
/// so a stale writer changes zero rows instead of clobbering the document.
pub struct SqliteRequestRepository {
    pub(crate) pool: SqlitePool,
}

impl SqliteRequestRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url` and run the migrations.
    pub async fn connect(database_url: &str, max_connections: u32) -> WorkflowResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| WorkflowError::StorageError(e.to_string()))?;

        sqlx::migrate!()
            .run(&pool)
            .await
            .map_err(|e| WorkflowError::StorageError(e.to_string()))?;

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl TryFromRow<SqliteRow> for CustomerRequestModel {
    fn try_from_row(row: &SqliteRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let data: String = row.try_get("data")?;
        let mut model = parse_document(&data)?;

        // Columns win over the document for the denormalized fields, so rows
        // written before the document carried them still load correctly.
        model.id = get_heapless_string(row, "id")?;
        let status: String = row.try_get("status")?;
        model.status = RequestStatus::from_str(&status)
            .map_err(|_| format!("Unknown request status '{status}'"))?;
        let created_at: DateTime<Utc> = row.try_get("created_at")?;
        let updated_at: DateTime<Utc> = row.try_get("updated_at")?;
        model.created_at = created_at;
        model.updated_at = updated_at;
        model.version = row.try_get("version")?;

        Ok(model)
    }
}
