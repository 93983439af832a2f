use async_trait::async_trait;

use request_core_api::error::WorkflowResult;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for replacing a stored entity under optimistic
/// concurrency
///
/// # Type Parameters
/// * `T` - The entity type that must implement the Identifiable trait
#[async_trait]
pub trait Update<T: Identifiable>: Send + Sync {
    /// Replace the stored entity, compare-and-swap on its version counter
    ///
    /// # Arguments
    /// * `entity` - The new state, already carrying the bumped version
    /// * `expected_version` - The version the caller read before mutating
    ///
    /// # Returns
    /// * `Ok(())` - The entity was replaced
    /// * `Err(WorkflowError::NotFound)` - No entity with that id exists
    /// * `Err(WorkflowError::Conflict)` - A concurrent writer got there
    ///   first; re-fetch and retry the whole operation
    async fn update(&self, entity: &T, expected_version: i64) -> WorkflowResult<()>;
}
