pub mod create;
pub mod delete;
pub mod list;
pub mod load;
pub mod next_sequence;
pub mod repo_impl;
pub mod update;

pub use repo_impl::SqliteRequestRepository;
