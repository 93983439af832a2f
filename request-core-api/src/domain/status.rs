use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle status of a customer request.
///
/// The wire representation is the snake_case status string stored in the
/// request document and its history entries. Transitions are only legal when
/// listed by [`RequestStatus::allowed_transitions`]; the table is the single
/// source of truth consulted by the workflow engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
pub enum RequestStatus {
    Draft,
    Submitted,
    UnderReview,
    ClarificationNeeded,
    FeasibilityConfirmed,
    InCosting,
    CostingComplete,
    SalesFollowup,
    GmApprovalPending,
    GmApproved,
    GmRejected,
    Closed,
}

impl RequestStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [RequestStatus; 12] = [
        RequestStatus::Draft,
        RequestStatus::Submitted,
        RequestStatus::UnderReview,
        RequestStatus::ClarificationNeeded,
        RequestStatus::FeasibilityConfirmed,
        RequestStatus::InCosting,
        RequestStatus::CostingComplete,
        RequestStatus::SalesFollowup,
        RequestStatus::GmApprovalPending,
        RequestStatus::GmApproved,
        RequestStatus::GmRejected,
        RequestStatus::Closed,
    ];

    /// Statuses legally reachable from `self` in one transition.
    ///
    /// `draft` is the initial status and `closed` the terminal one.
    /// `gm_rejected` may loop back to `sales_followup` for re-negotiation.
    pub fn allowed_transitions(&self) -> &'static [RequestStatus] {
        match self {
            RequestStatus::Draft => &[RequestStatus::Submitted],
            RequestStatus::Submitted => &[
                RequestStatus::UnderReview,
                RequestStatus::ClarificationNeeded,
            ],
            RequestStatus::ClarificationNeeded => &[RequestStatus::Submitted],
            RequestStatus::UnderReview => &[
                RequestStatus::FeasibilityConfirmed,
                RequestStatus::ClarificationNeeded,
            ],
            RequestStatus::FeasibilityConfirmed => &[RequestStatus::InCosting],
            RequestStatus::InCosting => &[RequestStatus::CostingComplete],
            RequestStatus::CostingComplete => &[RequestStatus::SalesFollowup],
            RequestStatus::SalesFollowup => &[
                RequestStatus::GmApprovalPending,
                RequestStatus::Closed,
            ],
            RequestStatus::GmApprovalPending => &[
                RequestStatus::GmApproved,
                RequestStatus::GmRejected,
            ],
            RequestStatus::GmApproved => &[RequestStatus::Closed],
            RequestStatus::GmRejected => &[
                RequestStatus::Closed,
                RequestStatus::SalesFollowup,
            ],
            RequestStatus::Closed => &[],
        }
    }

    /// Whether `self -> next` appears in the transition table.
    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    /// Statuses a request may be created in.
    pub fn is_initial(&self) -> bool {
        matches!(self, RequestStatus::Draft | RequestStatus::Submitted)
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_transitions().is_empty()
    }

    /// The snake_case status string used in documents and history entries.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Draft => "draft",
            RequestStatus::Submitted => "submitted",
            RequestStatus::UnderReview => "under_review",
            RequestStatus::ClarificationNeeded => "clarification_needed",
            RequestStatus::FeasibilityConfirmed => "feasibility_confirmed",
            RequestStatus::InCosting => "in_costing",
            RequestStatus::CostingComplete => "costing_complete",
            RequestStatus::SalesFollowup => "sales_followup",
            RequestStatus::GmApprovalPending => "gm_approval_pending",
            RequestStatus::GmApproved => "gm_approved",
            RequestStatus::GmRejected => "gm_rejected",
            RequestStatus::Closed => "closed",
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(RequestStatus::Draft),
            "submitted" => Ok(RequestStatus::Submitted),
            "under_review" => Ok(RequestStatus::UnderReview),
            "clarification_needed" => Ok(RequestStatus::ClarificationNeeded),
            "feasibility_confirmed" => Ok(RequestStatus::FeasibilityConfirmed),
            "in_costing" => Ok(RequestStatus::InCosting),
            "costing_complete" => Ok(RequestStatus::CostingComplete),
            "sales_followup" => Ok(RequestStatus::SalesFollowup),
            "gm_approval_pending" => Ok(RequestStatus::GmApprovalPending),
            "gm_approved" => Ok(RequestStatus::GmApproved),
            "gm_rejected" => Ok(RequestStatus::GmRejected),
            "closed" => Ok(RequestStatus::Closed),
            _ => Err(()),
        }
    }
}
