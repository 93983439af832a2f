use async_trait::async_trait;

use request_core_api::error::WorkflowResult;

/// Repository trait for the per-year request id counter
#[async_trait]
pub trait NextSequence: Send + Sync {
    /// Atomically increment-and-read the named counter
    ///
    /// Create-if-absent semantics: the first call for a counter name yields
    /// 1. The increment must be atomic under concurrent callers; two calls
    /// never observe the same value. Counters never reset except by moving
    /// to a new name (year rollover).
    ///
    /// # Arguments
    /// * `counter` - Counter name, e.g. `request_25`
    async fn next_sequence(&self, counter: &str) -> WorkflowResult<i64>;
}
