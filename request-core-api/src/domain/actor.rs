use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};

use crate::error::{WorkflowError, WorkflowResult};

use super::role::UserRole;

/// Identity of the user performing an operation.
///
/// Every transition records the actor on the appended history entry;
/// `create_request` stamps it into the immutable `createdBy` fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub user_id: HeaplessString<50>,
    pub user_name: HeaplessString<100>,
    pub role: UserRole,
}

impl Actor {
    pub fn new(user_id: &str, user_name: &str, role: UserRole) -> WorkflowResult<Self> {
        Ok(Actor {
            user_id: HeaplessString::try_from(user_id).map_err(|_| {
                WorkflowError::ValidationError("Actor user id is too long (max 50 chars)".into())
            })?,
            user_name: HeaplessString::try_from(user_name).map_err(|_| {
                WorkflowError::ValidationError("Actor user name is too long (max 100 chars)".into())
            })?,
            role,
        })
    }
}
