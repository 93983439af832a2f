use thiserror::Error;

use crate::domain::RequestStatus;

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Illegal transition: {from} -> {to}")]
    IllegalTransition {
        from: RequestStatus,
        to: RequestStatus,
    },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;
