use chrono::Duration;
use std::collections::HashMap;

use request_core_api::domain::RequestStatus;

use crate::models::request::HistoryEntryModel;

/// Read-side derivations over a request's immutable history. Pure functions,
/// no extra state.

/// Status recorded by the most recent history entry.
pub fn current_status(history: &[HistoryEntryModel]) -> Option<RequestStatus> {
    history.last().map(|entry| entry.status)
}

/// Time from submission to the design team's first reaction: the gap between
/// the first `submitted` entry and the first later entry in
/// `{under_review, clarification_needed, feasibility_confirmed}`.
pub fn design_response_time(history: &[HistoryEntryModel]) -> Option<Duration> {
    let submitted_at = history
        .iter()
        .find(|entry| entry.status == RequestStatus::Submitted)?
        .timestamp;

    history
        .iter()
        .filter(|entry| entry.timestamp >= submitted_at)
        .find(|entry| {
            matches!(
                entry.status,
                RequestStatus::UnderReview
                    | RequestStatus::ClarificationNeeded
                    | RequestStatus::FeasibilityConfirmed
            )
        })
        .map(|entry| entry.timestamp - submitted_at)
}

/// Number of history entries caused by each actor, keyed by user id.
pub fn activity_counts(history: &[HistoryEntryModel]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for entry in history {
        *counts.entry(entry.user_id.as_str().to_string()).or_insert(0) += 1;
    }
    counts
}
