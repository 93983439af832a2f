use async_trait::async_trait;

use request_core_api::error::WorkflowResult;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for deleting an entity by its id
///
/// # Type Parameters
/// * `T` - The entity type that must implement the Identifiable trait
#[async_trait]
pub trait Delete<T: Identifiable>: Send + Sync {
    /// Delete an entity by id
    ///
    /// # Returns
    /// * `Ok(true)` - The entity existed and was removed
    /// * `Ok(false)` - Nothing to delete
    async fn delete(&self, id: &str) -> WorkflowResult<bool>;
}
