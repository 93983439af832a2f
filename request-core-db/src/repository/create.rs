use async_trait::async_trait;

use request_core_api::error::WorkflowResult;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for persisting a new entity
///
/// # Type Parameters
/// * `T` - The entity type that must implement the Identifiable trait
#[async_trait]
pub trait Create<T: Identifiable>: Send + Sync {
    /// Persist a new entity
    ///
    /// # Arguments
    /// * `entity` - The entity to store; its id must not exist yet
    ///
    /// # Returns
    /// * `Ok(())` - The entity was stored
    /// * `Err(WorkflowError::StorageError)` - The store failed (including
    ///   id collisions, which indicate a broken id generator)
    async fn create(&self, entity: &T) -> WorkflowResult<()>;
}
