use async_trait::async_trait;

use request_core_api::error::WorkflowResult;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for listing all entities
///
/// # Type Parameters
/// * `T` - The entity type that must implement the Identifiable trait
#[async_trait]
pub trait List<T: Identifiable>: Send + Sync {
    /// All entities, most recently updated first
    async fn list(&self) -> WorkflowResult<Vec<T>>;
}
