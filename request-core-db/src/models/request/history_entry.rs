use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};

use request_core_api::domain::RequestStatus;
use request_core_api::error::{WorkflowError, WorkflowResult};

/// One entry of a request's append-only status history.
///
/// An entry records the moment the request *entered* `status`. History is
/// never edited or deleted in place, and the request's current `status`
/// always equals the status of its most recent entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntryModel {
    /// Unique within the owning request, `h-{millis}`, strictly increasing.
    pub id: HeaplessString<30>,
    pub status: RequestStatus,
    pub timestamp: DateTime<Utc>,
    pub user_id: HeaplessString<50>,
    pub user_name: HeaplessString<100>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl HistoryEntryModel {
    /// Generate the id for the next entry of `history` at time `now`.
    ///
    /// Derived from the millisecond timestamp, bumped past the previous
    /// entry's id so two transitions within one millisecond stay ordered.
    /// An id that does not fit its capacity is an error, never truncated.
    pub fn next_id(
        history: &[HistoryEntryModel],
        now: DateTime<Utc>,
    ) -> WorkflowResult<HeaplessString<30>> {
        let mut millis = now.timestamp_millis();
        if let Some(last) = history.last() {
            if let Some(prev) = last.id.strip_prefix("h-").and_then(|s| s.parse::<i64>().ok()) {
                if millis <= prev {
                    millis = prev + 1;
                }
            }
        }
        let id = format!("h-{millis}");
        HeaplessString::try_from(id.as_str()).map_err(|_| {
            WorkflowError::StorageError(format!("History id {id} exceeds the id capacity"))
        })
    }
}
