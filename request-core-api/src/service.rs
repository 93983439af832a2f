use async_trait::async_trait;

use crate::domain::{Actor, RequestStatus};
use crate::error::WorkflowResult;

/// Workflow operations exposed to the API layer.
///
/// This trait is the complete mutation and query surface of the request
/// workflow. Implementations own the request store and the id generator;
/// callers never mutate a request except through these operations, which
/// keeps the `status == history.last().status` invariant enforceable in one
/// place.
///
/// # Type Parameters
/// * `Record` - The full request record returned by every operation
/// * `Draft` - The create payload (no id, history, timestamps or creator)
/// * `Patch` - The typed partial update applied by `update_request_fields`
#[async_trait]
pub trait RequestWorkflow: Send + Sync {
    type Record;
    type Draft;
    type Patch;

    /// Create a request: assign the generated id, stamp the creating actor
    /// and seed the history with one entry at the initial status.
    async fn create_request(
        &self,
        draft: Self::Draft,
        actor: &Actor,
    ) -> WorkflowResult<Self::Record>;

    /// Load a request by id.
    ///
    /// # Returns
    /// * `Ok(Record)` - The stored request
    /// * `Err(WorkflowError::NotFound)` - No request with that id
    async fn get_request(&self, id: &str) -> WorkflowResult<Self::Record>;

    /// All requests, most recently updated first.
    async fn list_requests(&self) -> WorkflowResult<Vec<Self::Record>>;

    /// Merge a typed partial update into the stored record.
    ///
    /// Bumps `updatedAt` and the version counter; never appends history and
    /// never changes `status`.
    async fn update_request_fields(
        &self,
        id: &str,
        patch: Self::Patch,
    ) -> WorkflowResult<Self::Record>;

    /// Move a request to `status`, appending exactly one history entry.
    ///
    /// The (current, requested) pair must appear in the transition table and
    /// the actor's role must be allowed to enter `status`. Stage-specific
    /// data requirements are validated against the stored record before
    /// anything is written; the status change, the history append and any
    /// comment-derived field update land in a single atomic write.
    async fn apply_transition(
        &self,
        id: &str,
        status: RequestStatus,
        actor: &Actor,
        comment: Option<&str>,
    ) -> WorkflowResult<Self::Record>;

    /// Remove a request. Fails with `NotFound` for unknown ids.
    async fn delete_request(&self, id: &str) -> WorkflowResult<()>;
}
