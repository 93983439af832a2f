pub mod create;
pub mod delete;
pub mod list;
pub mod load;
pub mod next_sequence;
pub mod update;

// Re-exports
pub use create::*;
pub use delete::*;
pub use list::*;
pub use load::*;
pub use next_sequence::*;
pub use update::*;

use crate::models::request::CustomerRequestModel;

/// Everything the workflow engine needs from a request store.
///
/// Blanket-implemented for any type providing the individual operation
/// traits, so a store only ever implements the small traits.
pub trait RequestStore:
    Load<CustomerRequestModel>
    + List<CustomerRequestModel>
    + Create<CustomerRequestModel>
    + Update<CustomerRequestModel>
    + Delete<CustomerRequestModel>
    + NextSequence
{
}

impl<R> RequestStore for R where
    R: Load<CustomerRequestModel>
        + List<CustomerRequestModel>
        + Create<CustomerRequestModel>
        + Update<CustomerRequestModel>
        + Delete<CustomerRequestModel>
        + NextSequence
{
}
