use async_trait::async_trait;

use request_core_api::error::WorkflowResult;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for loading an entity by its id
///
/// # Type Parameters
/// * `T` - The entity type that must implement the Identifiable trait
#[async_trait]
pub trait Load<T: Identifiable>: Send + Sync {
    /// Load an entity by its unique identifier
    ///
    /// # Arguments
    /// * `id` - The business id of the entity to load
    ///
    /// # Returns
    /// * `Ok(Some(T))` - The loaded entity
    /// * `Ok(None)` - No entity with that id exists
    /// * `Err(WorkflowError::StorageError)` - The store failed
    async fn load(&self, id: &str) -> WorkflowResult<Option<T>>;
}
