use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::status::RequestStatus;

/// Role of the user acting on a request.
///
/// The role gate is advisory for trusted internal callers but the engine
/// still consults it on every transition: a role may only move a request
/// *into* the statuses listed by [`UserRole::may_enter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Sales,
    Design,
    Costing,
    Admin,
}

impl UserRole {
    /// Whether this role may move a request into `status`.
    ///
    /// Admin overrides the role gate (never the transition table). GM
    /// decisions ride the admin override; there is no dedicated GM role in
    /// the user directory.
    pub fn may_enter(&self, status: RequestStatus) -> bool {
        match self {
            UserRole::Admin => true,
            UserRole::Sales => matches!(
                status,
                RequestStatus::Submitted
                    | RequestStatus::GmApprovalPending
                    | RequestStatus::Closed
            ),
            UserRole::Design => matches!(
                status,
                RequestStatus::UnderReview
                    | RequestStatus::ClarificationNeeded
                    | RequestStatus::FeasibilityConfirmed
            ),
            UserRole::Costing => matches!(
                status,
                RequestStatus::InCosting | RequestStatus::CostingComplete
            ),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Sales => write!(f, "sales"),
            UserRole::Design => write!(f, "design"),
            UserRole::Costing => write!(f, "costing"),
            UserRole::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for UserRole {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sales" => Ok(UserRole::Sales),
            "design" => Ok(UserRole::Design),
            "costing" => Ok(UserRole::Costing),
            "admin" => Ok(UserRole::Admin),
            _ => Err(()),
        }
    }
}
